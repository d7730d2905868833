//! # 검색 엔진 쿼리 모델
//!
//! Elasticsearch Query DSL 중 이 서비스가 사용하는 부분만 타입으로 표현합니다.
//! `serde_json::json!`으로 임의의 JSON을 조립하는 대신 구조체를 쓰면,
//! "filter는 연도가 주어졌을 때만 존재한다" 같은 규칙을 타입 수준에서 확인할 수 있습니다.
//!
//! 직렬화 결과 예시:
//! ```json
//! {
//!   "query": {
//!     "bool": {
//!       "must": [ { "multi_match": { "query": "mars", "fields": ["title", "explanation"] } } ],
//!       "filter": [ { "range": { "date": { "gte": "2019-01-01", "lte": "2019-12-31", "format": "yyyy-MM-dd" } } } ]
//!     }
//!   },
//!   "from": 0,
//!   "size": 10
//! }
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

/// `_search` 요청 본문 전체
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchBody {
    pub query: Query,
    /// 건너뛸 결과 수 (페이지 시작 위치)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    /// 반환할 결과 수. 집계 전용 요청은 0입니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// 이름 → 집계 정의. BTreeMap이므로 직렬화 순서가 항상 같습니다.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aggs: BTreeMap<String, Aggregation>,
}

/// 최상위 쿼리. 이 서비스는 항상 `bool` 쿼리만 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub bool: BoolQuery,
}

/// `must`(점수에 반영되는 조건)와 `filter`(점수와 무관한 조건)로 이루어진 불리언 쿼리
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolQuery {
    pub must: Vec<Clause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Clause>,
}

/// 쿼리 절(clause)
///
/// serde의 기본 enum 표현(externally tagged)은 `{ "variant_name": { ... } }` 형태이므로
/// Elasticsearch의 `{ "multi_match": { ... } }` 모양과 정확히 일치합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    /// 여러 필드에 대해 같은 검색어로 전문검색
    MultiMatch { query: String, fields: Vec<String> },
    /// 필드 이름 → 범위 조건
    Range(BTreeMap<String, DateRange>),
}

/// 양 끝을 포함하는(inclusive) 날짜 범위
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub gte: String,
    pub lte: String,
    /// 경계값 문자열의 날짜 형식 (예: `yyyy-MM-dd`)
    pub format: String,
}

/// 집계(aggregation) 정의
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// 날짜 필드를 달력 단위 구간으로 나누어 문서 수를 셉니다.
    DateHistogram {
        field: String,
        calendar_interval: String,
        /// 버킷 키(`key_as_string`)의 출력 형식
        format: String,
    },
}

impl BoolQuery {
    /// 범위 필터가 붙어 있는지 여부
    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }
}
