//! # 검색 엔진 접근 계층
//!
//! 외부 검색 엔진과 직접 통신하는 코드를 모아둔 모듈입니다.
//! 라우트 핸들러와 서비스는 구체 타입(`ElasticClient`) 대신 `SearchEngine` 트레이트에만 의존하므로,
//! 테스트에서는 고정된 응답을 돌려주는 가짜 엔진으로 바꿔 끼울 수 있습니다.
//!
//! 하위 모듈:
//! - `elastic`: Elasticsearch REST API 클라이언트 (연결 재시도, 검색, 인덱스 생성, 벌크 적재)

pub mod elastic;

pub use elastic::ElasticClient;

use crate::error::AppError;
use crate::models::SearchBody;
use async_trait::async_trait;
use serde_json::Value;

/// 검색 요청 한 번을 왕복(round-trip)시키는 능력
///
/// `Send + Sync`: 여러 요청 핸들러가 서로 다른 스레드에서 동시에 같은 엔진을 사용하므로 필요합니다.
/// `#[async_trait]`: `Arc<dyn SearchEngine>`처럼 트레이트 객체로 쓰려면 async fn을 박싱해야 합니다.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// `body`를 실행하고 원시 JSON 응답을 돌려줍니다.
    ///
    /// `filter_path`는 응답에서 남길 경로 목록입니다 (예: `["hits.hits._source", "hits.total"]`).
    /// 구현체는 이 투영(projection)을 반드시 검색 엔진에 전달해야 합니다.
    /// 실패는 재시도하지 않고 곧바로 반환합니다.
    async fn search(&self, body: &SearchBody, filter_path: &[&str]) -> Result<Value, AppError>;
}
