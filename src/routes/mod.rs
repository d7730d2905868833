//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `search`: 페이지 검색과 연도별 문서 수 핸들러

pub mod health;
pub mod search;

pub use health::*;
pub use search::*;

use crate::engine::SearchEngine;
use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `Arc<dyn SearchEngine>`: 검색 엔진 연결 하나를 모든 요청이 공유합니다.
/// clone은 참조 카운트만 올리므로 요청마다 복제해도 비용이 거의 없습니다.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn SearchEngine>,
}

impl AppState {
    pub fn new(engine: Arc<dyn SearchEngine>) -> Self {
        Self { engine }
    }
}

/// API 라우터를 만듭니다.
///
/// - 모든 API는 `/api/v1` 아래에 위치합니다.
/// - `frontend_dist`가 주어지고 디렉토리가 존재하면 나머지 경로는 프론트엔드(SPA)로 보냅니다.
///
/// 연도별 문서 수 경로는 끝에 `/`가 붙은 형태로 공개되어 있으므로,
/// 두 형태(`.../get_docs_per_year_count`와 `.../get_docs_per_year_count/`)를 모두 등록합니다.
/// Axum은 끝의 `/` 유무를 서로 다른 경로로 취급하기 때문입니다.
pub fn build_router(state: AppState, frontend_dist: Option<&Path>) -> Router {
    let api_routes = Router::new()
        .route("/regular_search", get(regular_search))
        .route("/get_docs_per_year_count", get(get_docs_per_year_count))
        .route("/get_docs_per_year_count/", get(get_docs_per_year_count))
        .route("/health", get(health_check))
        .with_state(state);

    // 프론트엔드는 다른 출처(localhost:3000 등)에서 호출하므로 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().nest("/api/v1", api_routes);

    let router = match frontend_dist.filter(|dir| dir.exists()) {
        Some(dir) => {
            tracing::info!("Serving frontend static files from {}", dir.display());
            let serve_dir = ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html")));
            router.fallback_service(serve_dir)
        }
        None => router,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
