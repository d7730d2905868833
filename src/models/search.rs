//! # 검색 요청/결과 모델
//!
//! HTTP 쿼리 파라미터(`SearchParams`)와, 검증을 통과한 내부 요청(`SearchRequest`),
//! 그리고 핸들러가 돌려주는 결과 타입을 정의합니다.

use crate::error::AppError;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use serde_json::Value;

/// 한 페이지의 기본 결과 수
pub const DEFAULT_LIMIT: i64 = 10;

/// `GET /api/v1/regular_search`의 쿼리 파라미터
///
/// 정수 필드를 `i64`로 받는 이유: 음수도 일단 받아서 `from_params`에서 구체적인 메시지와 함께
/// `InvalidArgument`로 거부하기 위해서입니다. 숫자가 아닌 값(`skip=abc`)은 역직렬화 단계에서 실패하며,
/// 핸들러가 그 거부(`QueryRejection`)도 `InvalidArgument`로 바꿉니다.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search_query: String,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub year: Option<String>,
}

/// `GET /api/v1/get_docs_per_year_count/`의 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct HistogramParams {
    pub search_query: String,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// 검증을 통과한 검색 요청
///
/// 이 타입의 값이 존재한다면 `limit > 0`이 보장됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query_text: String,
    pub skip: u64,
    pub limit: u64,
    /// 4자리 연도 문자열 (예: "2019"). 형식 검증은 검색 엔진에 맡깁니다.
    pub year: Option<String>,
}

impl SearchRequest {
    /// 첫 페이지, 기본 페이지 크기, 연도 필터 없는 요청을 만듭니다.
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            skip: 0,
            limit: DEFAULT_LIMIT as u64,
            year: None,
        }
    }

    pub fn with_page(mut self, skip: u64, limit: u64) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// HTTP 파라미터를 검증하여 `SearchRequest`로 변환합니다.
    ///
    /// # 에러
    /// - `skip < 0` 또는 `limit <= 0`이면 `AppError::InvalidArgument`
    ///
    /// 빈 문자열(또는 공백뿐인) `year`는 "연도 필터 없음"으로 취급합니다.
    /// 프론트엔드의 연도 선택 상자가 비어 있을 때 `year=`가 그대로 전송되기 때문입니다.
    pub fn from_params(params: SearchParams) -> Result<Self, AppError> {
        // u64::try_from(): 음수면 Err를 반환하는 안전한 정수 변환
        let skip = u64::try_from(params.skip).map_err(|_| {
            AppError::InvalidArgument(format!("skip must be non-negative, got {}", params.skip))
        })?;
        if params.limit <= 0 {
            return Err(AppError::InvalidArgument(format!(
                "limit must be positive, got {}",
                params.limit
            )));
        }

        let year = params
            .year
            .map(|y| y.trim().to_string())
            .filter(|y| !y.is_empty());

        Ok(Self {
            query_text: params.search_query,
            skip,
            limit: params.limit as u64,
            year,
        })
    }
}

/// 페이지 단위 검색 결과
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// 검색 엔진이 돌려준 hit(`_source`, `_score` 포함)를 관련도 순서 그대로 담습니다.
    pub hits: Vec<Value>,
    pub total_hits: u64,
    pub max_pages: u64,
}

/// 연도 → 문서 수 매핑
///
/// `HashMap`은 순서를 보장하지 않으므로, 버킷 순서(오름차순 연도)를 지키기 위해
/// `Vec<(String, u64)>`에 담고 JSON 객체로 직렬화합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearHistogram(Vec<(String, u64)>);

impl YearHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(label, _)| label == year)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 삽입 순서대로 연도 라벨을 돌려줍니다.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(label, _)| label.as_str())
    }

    /// 전체 문서 수 합계
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl FromIterator<(String, u64)> for YearHistogram {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// 직렬화 결과: { "2020": 5, "2021": 3 } (삽입 순서 유지)
impl Serialize for YearHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(year, count)| (year, count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(skip: i64, limit: i64, year: Option<&str>) -> SearchParams {
        SearchParams {
            search_query: "mars".to_string(),
            skip,
            limit,
            year: year.map(str::to_string),
        }
    }

    #[test]
    fn from_params_accepts_defaults() {
        let request = SearchRequest::from_params(params(0, DEFAULT_LIMIT, None)).unwrap();
        assert_eq!(request, SearchRequest::new("mars"));
    }

    #[test]
    fn from_params_rejects_bad_paging() {
        assert!(matches!(
            SearchRequest::from_params(params(0, 0, None)),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            SearchRequest::from_params(params(0, -5, None)),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            SearchRequest::from_params(params(-1, 10, None)),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn blank_year_means_no_filter() {
        let request = SearchRequest::from_params(params(0, 10, Some("  "))).unwrap();
        assert_eq!(request.year, None);

        let request = SearchRequest::from_params(params(0, 10, Some("2019"))).unwrap();
        assert_eq!(request.year.as_deref(), Some("2019"));
    }

    #[test]
    fn histogram_serializes_as_ordered_object() {
        let histogram: YearHistogram = vec![
            ("2021".to_string(), 3),
            ("1999".to_string(), 1),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&histogram).unwrap();
        assert_eq!(json, r#"{"2021":3,"1999":1}"#);
        assert_eq!(histogram.total(), 4);
    }
}
