//! # 쿼리 빌더
//!
//! 검색어와 선택적 연도 필터를 Elasticsearch `bool` 쿼리로 변환하는 순수 함수들입니다.
//! I/O가 없으므로 같은 입력에는 항상 같은 `SearchBody`가 나옵니다.

use crate::models::{Aggregation, BoolQuery, Clause, DateRange, Query, SearchBody};
use std::collections::BTreeMap;

/// 전문검색 대상 필드
pub const SEARCH_FIELDS: [&str; 2] = ["title", "explanation"];

/// 날짜 필드 이름 (범위 필터와 히스토그램 모두 사용)
pub const DATE_FIELD: &str = "date";

/// 연도별 히스토그램 집계의 이름. 응답의 `aggregations.<이름>` 경로가 됩니다.
pub const DOCS_PER_YEAR_AGG: &str = "docs_per_year";

/// 검색어를 `title`, `explanation` 두 필드에 대한 `multi_match` 절로 만듭니다.
///
/// 빈 문자열도 그대로 전달합니다. 빈 검색어를 어떻게 다룰지는 검색 엔진이 결정합니다.
fn multi_match(query_text: &str) -> Clause {
    Clause::MultiMatch {
        query: query_text.to_string(),
        fields: SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
    }
}

/// `year`년 1월 1일부터 12월 31일까지(양 끝 포함)의 날짜 범위 필터
fn year_range(year: &str) -> Clause {
    let range = DateRange {
        gte: format!("{year}-01-01"),
        lte: format!("{year}-12-31"),
        format: "yyyy-MM-dd".to_string(),
    };
    Clause::Range(BTreeMap::from([(DATE_FIELD.to_string(), range)]))
}

/// 페이지 단위 검색 쿼리를 만듭니다.
///
/// - `must`: 항상 `multi_match` 하나
/// - `filter`: `year`가 주어졌을 때만 날짜 범위 하나
/// - `from`/`size`: `skip`/`limit` 그대로
///
/// 연도 형식은 검증하지 않습니다. `"20x1"` 같은 값은 검색 엔진이 날짜 파싱 에러로 거부하고,
/// 그 메시지가 호출자에게 그대로 전달됩니다.
pub fn build_search_query(
    query_text: &str,
    year: Option<&str>,
    skip: u64,
    limit: u64,
) -> SearchBody {
    // Option::map + into_iter: Some이면 원소 1개, None이면 0개인 Vec이 됩니다.
    let filter: Vec<Clause> = year.map(year_range).into_iter().collect();

    SearchBody {
        query: Query {
            bool: BoolQuery {
                must: vec![multi_match(query_text)],
                filter,
            },
        },
        from: Some(skip),
        size: Some(limit),
        aggs: BTreeMap::new(),
    }
}

/// 연도별 문서 수를 세는 집계 쿼리를 만듭니다.
///
/// hit 자체는 필요 없으므로 `size: 0`으로 요청합니다.
/// 버킷 키는 `yyyy` 형식이므로 응답의 `key_as_string`은 "2020" 같은 연도 문자열이 됩니다.
pub fn build_aggregation_query(query_text: &str) -> SearchBody {
    let histogram = Aggregation::DateHistogram {
        field: DATE_FIELD.to_string(),
        calendar_interval: "year".to_string(),
        format: "yyyy".to_string(),
    };

    SearchBody {
        query: Query {
            bool: BoolQuery {
                must: vec![multi_match(query_text)],
                filter: Vec::new(),
            },
        },
        from: None,
        size: Some(0),
        aggs: BTreeMap::from([(DOCS_PER_YEAR_AGG.to_string(), histogram)]),
    }
}
