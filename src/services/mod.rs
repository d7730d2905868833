//! # 서비스 계층
//!
//! HTTP와 무관한 검색 로직을 모아둔 모듈입니다.
//! - `query`: 검색어 → 검색 엔진 쿼리 변환 (순수 함수)
//! - `pagination`: 전체 결과 수 → 페이지 수 계산 (순수 함수)
//! - `aggregation`: 집계 응답 → 연도별 문서 수 (순수 함수)
//! - `search`: 위 셋과 검색 엔진 왕복을 묶은 요청 처리 함수

pub mod aggregation;
pub mod pagination;
pub mod query;
pub mod search;

pub use aggregation::extract_year_counts;
pub use pagination::max_pages;
pub use query::{build_aggregation_query, build_search_query};
pub use search::{search, year_histogram};
