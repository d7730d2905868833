//! # APOD 검색 게이트웨이
//!
//! Elasticsearch에 저장된 APOD(Astronomy Picture of the Day) 레코드를 검색하는
//! 작은 HTTP API입니다.
//!
//! 모듈 구성:
//! - `config`: 환경변수 기반 설정
//! - `engine`: 검색 엔진 추상화(`SearchEngine`)와 Elasticsearch 클라이언트
//! - `error`: 에러 타입과 HTTP 응답 변환
//! - `ingest`: APOD JSON 덤프 적재
//! - `models`: 요청/응답/쿼리 구조체
//! - `routes`: HTTP 핸들러와 라우터
//! - `services`: 쿼리 생성, 페이지 계산, 집계 추출

pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::{build_router, AppState};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 전역 로거를 초기화합니다.
///
/// `RUST_LOG` 환경변수가 있으면 그 값을, 없으면
/// `apod_search`, `tower_http`, `axum` 모듈을 debug 레벨로 출력합니다.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apod_search=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
