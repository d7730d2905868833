//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `apod`: 적재 대상 APOD 레코드
//! - `query`: 검색 엔진에 보내는 쿼리 본문
//! - `search`: HTTP 파라미터, 검색 요청/결과, 연도별 히스토그램
//!
//! `pub use X::*;`로 재공개하여 `crate::models::SearchBody`처럼 짧게 쓸 수 있습니다.

pub mod apod;
pub mod query;
pub mod search;

pub use apod::*;
pub use query::*;
pub use search::*;
