//! # APOD 데이터 적재 도구
//!
//! ```text
//! cargo run --bin index_data -- data/apod.json
//! ```
//!
//! 1. 환경변수(.env) 로딩과 로깅 초기화
//! 2. 검색 엔진 연결 (재시도 포함)
//! 3. 인덱스 재생성 후 문서 벌크 적재

use anyhow::{Context, Result};
use apod_search::{
    config::EngineConfig,
    engine::ElasticClient,
    ingest::{self, BATCH_SIZE},
};

/// 인자가 없을 때 읽을 기본 파일 경로
const DEFAULT_DATA_PATH: &str = "data/apod.json";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    apod_search::init_tracing();

    // std::env::args(): 명령줄 인자. 첫 번째(0번)는 실행 파일 이름이므로 nth(1)을 읽습니다.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

    let documents = ingest::load_apod_file(&path)
        .await
        .with_context(|| format!("failed to load APOD records from {path}"))?;
    tracing::info!("Loaded {} documents from {}", documents.len(), path);

    let config = EngineConfig::from_env();
    let client = ElasticClient::connect(&config).await?;

    let summary = ingest::index_documents(&client, &documents, BATCH_SIZE).await?;
    if summary.failed > 0 {
        tracing::warn!("{} documents were rejected by the search engine", summary.failed);
    }
    tracing::info!(
        "Indexed {} documents into Elasticsearch index '{}'",
        summary.indexed,
        client.index_name()
    );

    Ok(())
}
