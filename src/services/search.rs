//! # 검색 서비스
//!
//! 쿼리 빌더 → 검색 엔진 왕복 → 페이지 계산/집계 추출을 하나로 묶습니다.
//! HTTP와 무관하므로 라우트 핸들러 없이도 가짜 엔진으로 테스트할 수 있습니다.

use crate::engine::SearchEngine;
use crate::error::AppError;
use crate::models::{SearchRequest, SearchResult, YearHistogram};
use crate::services::aggregation::extract_year_counts;
use crate::services::pagination::max_pages;
use crate::services::query::{build_aggregation_query, build_search_query, DOCS_PER_YEAR_AGG};
use serde::Deserialize;
use serde_json::Value;

/// 페이지 검색 응답에서 남길 경로. hit의 원문과 점수, 전체 개수만 받습니다.
pub const SEARCH_FILTER_PATH: [&str; 3] = ["hits.hits._source", "hits.hits._score", "hits.total"];

// `filter_path`는 비어 있는 부분을 응답에서 통째로 지웁니다.
// 결과가 0건이면 `hits.hits`가 없을 수 있으므로 모든 단계에 기본값을 둡니다.
#[derive(Debug, Default, Deserialize)]
struct EngineSearchResponse {
    #[serde(default)]
    hits: EngineHits,
}

#[derive(Debug, Default, Deserialize)]
struct EngineHits {
    #[serde(default)]
    hits: Vec<Value>,
    #[serde(default)]
    total: Option<EngineTotal>,
}

// 7.x 이후는 `{ "value": 25, "relation": "eq" }`, `rest_total_hits_as_int`를 켜면 정수 하나입니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EngineTotal {
    Object { value: u64 },
    Count(u64),
}

impl EngineTotal {
    fn value(&self) -> u64 {
        match self {
            EngineTotal::Object { value } | EngineTotal::Count(value) => *value,
        }
    }
}

/// 페이지 단위 검색을 수행합니다.
///
/// 1. 검색어/연도/페이지 정보로 `bool` 쿼리를 만들고
/// 2. `hits`와 `total`만 남기도록 투영하여 검색 엔진에 한 번 요청한 뒤
/// 3. `hits.total.value`와 요청한 `limit`으로 전체 페이지 수를 계산합니다.
///
/// hit은 검색 엔진이 돌려준 순서(관련도순) 그대로, 내용도 손대지 않고 반환합니다.
pub async fn search(
    engine: &dyn SearchEngine,
    request: &SearchRequest,
) -> Result<SearchResult, AppError> {
    // 왕복 전에 사전조건을 확인합니다. limit이 0이면 검색 엔진을 부르지 않습니다.
    if request.limit == 0 {
        return Err(AppError::InvalidArgument(
            "limit must be positive".to_string(),
        ));
    }

    let body = build_search_query(
        &request.query_text,
        request.year.as_deref(),
        request.skip,
        request.limit,
    );

    let raw = engine.search(&body, &SEARCH_FILTER_PATH).await?;
    let parsed: EngineSearchResponse = serde_json::from_value(raw)
        .map_err(|e| AppError::EngineQuery(format!("unexpected search response: {e}")))?;

    let total_hits = parsed.hits.total.as_ref().map(EngineTotal::value).unwrap_or(0);
    let max_pages = max_pages(total_hits, request.limit)?;

    tracing::debug!(
        query = %request.query_text,
        year = ?request.year,
        skip = request.skip,
        limit = request.limit,
        total_hits,
        returned = parsed.hits.hits.len(),
        "Search completed"
    );

    Ok(SearchResult {
        hits: parsed.hits.hits,
        total_hits,
        max_pages,
    })
}

/// 검색어와 일치하는 문서 수를 연도별로 셉니다.
///
/// 응답에서 `aggregations.docs_per_year`만 받아오며,
/// 집계 결과가 비어 있거나 일부가 빠져 있어도 에러 없이 빈 히스토그램을 돌려줍니다.
/// 검색 엔진 왕복 자체가 실패한 경우에만 에러가 됩니다.
pub async fn year_histogram(
    engine: &dyn SearchEngine,
    query_text: &str,
) -> Result<YearHistogram, AppError> {
    let body = build_aggregation_query(query_text);
    let filter_path = format!("aggregations.{DOCS_PER_YEAR_AGG}");

    let raw = engine.search(&body, &[filter_path.as_str()]).await?;
    let histogram = extract_year_counts(&raw);

    tracing::debug!(
        query = %query_text,
        years = histogram.len(),
        "Year histogram computed"
    );
    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchBody;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// 일치 문서가 `total`개 있는 인덱스를 흉내 내는 가짜 엔진
    ///
    /// `from`/`size`를 존중하여 해당 페이지의 hit만 돌려주고, 받은 요청을 기록합니다.
    struct FixtureEngine {
        total: u64,
        calls: Mutex<Vec<(SearchBody, Vec<String>)>>,
    }

    impl FixtureEngine {
        fn with_matches(total: u64) -> Self {
            Self {
                total,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn last_call(&self) -> (SearchBody, Vec<String>) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl SearchEngine for FixtureEngine {
        async fn search(
            &self,
            body: &SearchBody,
            filter_path: &[&str],
        ) -> Result<Value, AppError> {
            self.calls.lock().unwrap().push((
                body.clone(),
                filter_path.iter().map(|p| p.to_string()).collect(),
            ));

            if !body.aggs.is_empty() {
                return Ok(json!({
                    "aggregations": { "docs_per_year": { "buckets": [
                        { "key_as_string": "2019", "doc_count": 15 },
                        { "key_as_string": "2020", "doc_count": 10 }
                    ] } }
                }));
            }

            let from = body.from.unwrap_or(0);
            let size = body.size.unwrap_or(10);
            let end = (from + size).min(self.total);
            let hits: Vec<Value> = (from..end)
                .map(|i| json!({ "_score": 10.0 - i as f64 * 0.1, "_source": { "title": format!("doc {i}") } }))
                .collect();

            Ok(json!({ "hits": { "total": { "value": self.total, "relation": "eq" }, "hits": hits } }))
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl SearchEngine for FailingEngine {
        async fn search(&self, _: &SearchBody, _: &[&str]) -> Result<Value, AppError> {
            Err(AppError::EngineQuery(
                "400 Bad Request: failed to parse date field [20x1-01-01]".to_string(),
            ))
        }
    }

    #[tokio::test]
    async fn first_page_of_25_matches() {
        let engine = FixtureEngine::with_matches(25);
        let result = search(&engine, &SearchRequest::new("mars").with_page(0, 10))
            .await
            .unwrap();

        assert_eq!(result.max_pages, 3);
        assert_eq!(result.total_hits, 25);
        assert_eq!(result.hits.len(), 10);
        assert_eq!(result.hits[0]["_source"]["title"], "doc 0");
        assert_eq!(result.hits[9]["_source"]["title"], "doc 9");
    }

    #[tokio::test]
    async fn last_page_is_partial() {
        let engine = FixtureEngine::with_matches(25);
        let result = search(&engine, &SearchRequest::new("mars").with_page(20, 10))
            .await
            .unwrap();

        assert_eq!(result.hits.len(), 5);
        assert_eq!(result.max_pages, 3);
    }

    #[tokio::test]
    async fn search_sends_projection_and_year_filter() {
        let engine = FixtureEngine::with_matches(3);
        search(&engine, &SearchRequest::new("mars").with_year("2019"))
            .await
            .unwrap();

        let (body, filter_path) = engine.last_call();
        assert!(body.query.bool.has_filter());
        assert_eq!(body.from, Some(0));
        assert_eq!(body.size, Some(10));
        assert_eq!(
            filter_path,
            vec!["hits.hits._source", "hits.hits._score", "hits.total"]
        );
    }

    #[tokio::test]
    async fn projected_away_hits_mean_zero_pages() {
        struct EmptyEngine;

        #[async_trait]
        impl SearchEngine for EmptyEngine {
            async fn search(&self, _: &SearchBody, _: &[&str]) -> Result<Value, AppError> {
                Ok(json!({}))
            }
        }

        let result = search(&EmptyEngine, &SearchRequest::new("nothing"))
            .await
            .unwrap();
        assert!(result.hits.is_empty());
        assert_eq!(result.total_hits, 0);
        assert_eq!(result.max_pages, 0);
    }

    #[tokio::test]
    async fn integer_total_is_accepted() {
        struct LegacyEngine;

        #[async_trait]
        impl SearchEngine for LegacyEngine {
            async fn search(&self, _: &SearchBody, _: &[&str]) -> Result<Value, AppError> {
                Ok(json!({ "hits": { "total": 11, "hits": [ { "_source": { "title": "x" } } ] } }))
            }
        }

        let result = search(&LegacyEngine, &SearchRequest::new("x").with_page(0, 5))
            .await
            .unwrap();
        assert_eq!(result.total_hits, 11);
        assert_eq!(result.max_pages, 3);
    }

    #[tokio::test]
    async fn zero_limit_never_reaches_engine() {
        let engine = FixtureEngine::with_matches(25);
        let err = search(&engine, &SearchRequest::new("mars").with_page(0, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidArgument(_)));
        assert!(engine.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn engine_errors_are_surfaced_unchanged() {
        let err = search(&FailingEngine, &SearchRequest::new("mars").with_year("20x1"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse date field"));
    }

    #[tokio::test]
    async fn histogram_requests_only_aggregation_subtree() {
        let engine = FixtureEngine::with_matches(25);
        let histogram = year_histogram(&engine, "mars").await.unwrap();

        assert_eq!(histogram.years().collect::<Vec<_>>(), vec!["2019", "2020"]);
        assert_eq!(histogram.total(), 25);

        let (body, filter_path) = engine.last_call();
        assert_eq!(body.size, Some(0));
        assert!(!body.query.bool.has_filter());
        assert_eq!(filter_path, vec!["aggregations.docs_per_year"]);
    }

    #[tokio::test]
    async fn histogram_propagates_round_trip_failure() {
        let err = year_histogram(&FailingEngine, "mars").await.unwrap_err();
        assert!(matches!(err, AppError::EngineQuery(_)));
    }
}
