//! # APOD 검색 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 검색 엔진 연결 (정해진 횟수만큼 재시도)
//! 4. API 라우터 설정
//! 5. HTTP 서버 시작

use anyhow::Result;
use apod_search::{build_router, config::Config, engine::ElasticClient, AppState};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok(): .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅 초기화 ──
    apod_search::init_tracing();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting APOD search server on {}:{}", config.host, config.port);

    // ── 4단계: 검색 엔진 연결 ──
    // 재시도를 모두 소진하면 ConnectionUnavailable 에러로 프로세스가 종료됩니다.
    // 검색 엔진 없이는 어떤 요청도 처리할 수 없기 때문입니다.
    let engine = ElasticClient::connect(&config.engine).await?;

    // ── 5단계: 애플리케이션 상태와 라우터 ──
    // Arc::new(engine): 구체 타입 ElasticClient를 Arc<dyn SearchEngine>으로 감쌉니다.
    let state = AppState::new(Arc::new(engine));
    let frontend_dist = Path::new(&config.frontend_dist);
    if !frontend_dist.exists() {
        tracing::warn!("Frontend dist directory not found, serving API only");
    }
    let app = build_router(state, Some(frontend_dist));

    // ── 6단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
