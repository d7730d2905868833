//! # Elasticsearch 클라이언트
//!
//! `reqwest`로 Elasticsearch REST API를 호출합니다.
//!
//! ## 연결 수명
//! `ElasticClient`는 서버 시작 시 한 번 만들어져 모든 요청이 공유합니다.
//! `reqwest::Client`는 내부에 연결 풀을 가지고 있고 `Clone`이 Arc 복사에 불과하므로,
//! 동시 요청에 그대로 사용해도 안전합니다.
//!
//! ## 재시도 정책
//! 재시도는 시작 시 연결 확인(`connect`)에서만 합니다.
//! 검색 요청이 실패하면 재시도하지 않고 곧바로 에러를 돌려줍니다.

use super::SearchEngine;
use crate::config::EngineConfig;
use crate::error::AppError;
use crate::models::SearchBody;
use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// 연결 확인 요청의 제한 시간. 시작 단계에서 오래 멈추지 않도록 요청 제한 시간보다 짧게 둡니다.
const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Elasticsearch REST API 클라이언트
#[derive(Clone)]
pub struct ElasticClient {
    client: Client,
    /// 끝에 `/`가 없는 기본 URL (예: `http://localhost:9200`)
    base_url: String,
    index_name: String,
    username: Option<String>,
    password: Option<String>,
}

/// 벌크 적재 결과 요약
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub indexed: usize,
    pub failed: usize,
}

impl ElasticClient {
    /// 설정으로 클라이언트를 만듭니다. 네트워크 요청은 하지 않습니다.
    pub fn new(config: &EngineConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(PING_TIMEOUT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            index_name: config.index_name.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// 클라이언트를 만들고, 검색 엔진이 응답할 때까지 최대 `max_retries`번 연결을 확인합니다.
    ///
    /// 시도 사이에는 `retry_delay`만큼 기다립니다 (고정 간격).
    /// 마지막 시도까지 실패하면 `AppError::ConnectionUnavailable`을 반환하며,
    /// 서버는 이 경우 요청을 받지 않고 종료해야 합니다.
    pub async fn connect(config: &EngineConfig) -> Result<Self, AppError> {
        let client = Self::new(config)?;
        let attempts = config.max_retries.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match client.ping().await {
                Ok(()) => {
                    tracing::info!(
                        url = %client.base_url,
                        index = %client.index_name,
                        attempt,
                        "Connected to Elasticsearch"
                    );
                    return Ok(client);
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        attempts,
                        error = %e,
                        "Elasticsearch is not reachable yet"
                    );
                    last_error = e.to_string();
                    if attempt < attempts {
                        tokio::time::sleep(config.retry_delay).await;
                    }
                }
            }
        }

        Err(AppError::ConnectionUnavailable(format!(
            "{} after {} attempt(s): {}",
            client.base_url, attempts, last_error
        )))
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// 클러스터 루트(`GET /`)를 호출해 응답이 오는지 확인합니다.
    pub async fn ping(&self) -> Result<(), AppError> {
        let response = self
            .request(Method::GET, "")
            .timeout(PING_TIMEOUT)
            .send()
            .await?;
        read_json(response).await.map(|_| ())
    }

    /// 인덱스를 지우고 새로 만듭니다. 인덱스가 없어서 삭제가 404를 돌려주는 것은 정상입니다.
    ///
    /// 매핑은 지정하지 않습니다. `date` 필드는 "yyyy-MM-dd" 문자열이므로
    /// 동적 매핑이 날짜 타입으로 인식합니다.
    pub async fn recreate_index(&self) -> Result<(), AppError> {
        let path = self.index_name.clone();

        let response = self.request(Method::DELETE, &path).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(index = %self.index_name, "Index did not exist, nothing to delete");
        } else {
            read_json(response).await?;
            tracing::info!(index = %self.index_name, "Deleted existing index");
        }

        let response = self.request(Method::PUT, &path).send().await?;
        read_json(response).await?;
        tracing::info!(index = %self.index_name, "Created index");
        Ok(())
    }

    /// 문서들을 `_bulk` API로 한 번에 적재합니다.
    ///
    /// 본문은 NDJSON(줄마다 JSON 하나) 형식이며, 문서마다 동작 줄과 문서 줄이 한 쌍을 이룹니다:
    /// ```text
    /// {"index":{"_index":"apod"}}
    /// {"date":"2020-01-01","title":"...","explanation":"..."}
    /// ```
    /// 일부 문서만 실패해도 요청 자체는 200이므로, 항목별 결과를 세어 요약으로 돌려줍니다.
    pub async fn bulk_index<T: Serialize>(&self, documents: &[T]) -> Result<BulkSummary, AppError> {
        if documents.is_empty() {
            return Ok(BulkSummary::default());
        }

        let body = bulk_body(&self.index_name, documents)?;
        let response = self
            .request(Method::POST, "_bulk")
            .header(header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await?;
        let result = read_json(response).await?;

        Ok(summarize_bulk(&result, documents.len()))
    }

    /// 기본 URL 뒤에 `path`를 붙인 요청을 만들고, 설정된 경우 Basic 인증을 추가합니다.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.username {
            Some(username) => builder.basic_auth(username, self.password.as_deref()),
            None => builder,
        }
    }
}

#[async_trait]
impl SearchEngine for ElasticClient {
    async fn search(&self, body: &SearchBody, filter_path: &[&str]) -> Result<Value, AppError> {
        let path = format!("{}/_search", self.index_name);
        let mut builder = self.request(Method::POST, &path).json(body);
        if !filter_path.is_empty() {
            builder = builder.query(&[("filter_path", filter_path.join(","))]);
        }

        tracing::debug!(index = %self.index_name, ?filter_path, "Executing search");
        let response = builder.send().await?;
        read_json(response).await
    }
}

// 비밀번호가 로그에 찍히지 않도록 Debug를 직접 구현합니다.
impl fmt::Debug for ElasticClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticClient")
            .field("base_url", &self.base_url)
            .field("index_name", &self.index_name)
            .field("has_credentials", &self.username.is_some())
            .finish()
    }
}

/// 응답 상태를 확인하고 본문을 JSON으로 읽습니다.
///
/// - 2xx가 아니면 검색 엔진의 에러 사유를 담은 `AppError::EngineQuery`
/// - 2xx인데 본문이 JSON이 아니면 역시 `AppError::EngineQuery` (깨진 응답)
async fn read_json(response: Response) -> Result<Value, AppError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let text = String::from_utf8_lossy(&bytes);
        return Err(AppError::EngineQuery(format!(
            "{}: {}",
            status,
            error_reason(&text)
        )));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::EngineQuery(format!("malformed response body: {e}")))
}

/// Elasticsearch 에러 본문에서 사람이 읽을 만한 사유를 꺼냅니다.
///
/// 우선순위: `error.root_cause[0].reason` → `error.reason` → 문자열 `error` → 원문 전체
pub fn error_reason(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    let Some(error) = json.get("error") else {
        return body.trim().to_string();
    };

    error
        .get("root_cause")
        .and_then(|causes| causes.get(0))
        .and_then(|cause| cause.get("reason"))
        .or_else(|| error.get("reason"))
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

fn bulk_body<T: Serialize>(index_name: &str, documents: &[T]) -> Result<String, AppError> {
    let action = serde_json::to_string(&serde_json::json!({ "index": { "_index": index_name } }))?;
    let mut body = String::new();
    for document in documents {
        body.push_str(&action);
        body.push('\n');
        body.push_str(&serde_json::to_string(document)?);
        body.push('\n');
    }
    Ok(body)
}

/// `_bulk` 응답의 `items[]`를 훑어 성공/실패 수를 셉니다.
fn summarize_bulk(result: &Value, submitted: usize) -> BulkSummary {
    // errors가 false면 항목을 볼 필요 없이 전부 성공입니다.
    if !result.get("errors").and_then(Value::as_bool).unwrap_or(false) {
        return BulkSummary {
            indexed: submitted,
            failed: 0,
        };
    }

    let items = result
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut failed = 0;
    for item in items {
        if let Some(error) = item.get("index").and_then(|op| op.get("error")) {
            if failed == 0 {
                tracing::warn!(%error, "Bulk item rejected");
            }
            failed += 1;
        }
    }

    BulkSummary {
        indexed: submitted.saturating_sub(failed),
        failed,
    }
}
