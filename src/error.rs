//! # 에러 처리 모듈
//!
//! 검색 게이트웨이에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! ## 에러 종류와 처리 방침
//! | variant | 원인 | HTTP |
//! |---------|------|------|
//! | `InvalidArgument` | 호출자가 보낸 파라미터가 사전조건을 어김 (검색 엔진 호출 전 거부) | 400 |
//! | `EngineQuery` | 검색 엔진이 쿼리를 거부했거나 응답이 깨짐 | 500 |
//! | `Transport` | 요청 도중 검색 엔진과의 통신 실패 | 500 |
//! | `ConnectionUnavailable` | 시작 시 재시도 후에도 검색 엔진에 연결 불가 (프로세스 종료) | 503 |

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 호출자가 보낸 값이 사전조건을 만족하지 않음 (예: `limit <= 0`)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 재시도를 모두 소진해도 검색 엔진에 연결할 수 없음
    ///
    /// 서버 시작 단계에서만 발생하며, 이 경우 프로세스는 요청을 처리할 수 없습니다.
    #[error("Search engine unavailable: {0}")]
    ConnectionUnavailable(String),

    /// 검색 엔진이 쿼리를 거부했거나(잘못된 연도 형식 등) 응답 구조가 예상과 다름
    ///
    /// 문자열에는 검색 엔진이 돌려준 상세 메시지가 담깁니다.
    #[error("Search engine error: {0}")]
    EngineQuery(String),

    /// 요청 처리 중 HTTP 통신 실패
    /// #[from]: `reqwest::Error`에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Search engine transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON 직렬화/역직렬화 실패
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 파일 입출력 오류 (데이터 적재 도구에서 사용)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// 쿼리 문자열 파싱 실패(예: `skip=abc`, `search_query` 누락)도 400 JSON 에러 형식으로 응답합니다.
// Axum의 기본 거부 응답은 일반 텍스트이므로 핸들러에서 이 변환을 거칩니다.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 검색 엔진 쪽 실패는 상세 메시지를 그대로 클라이언트에 전달합니다.
    /// 어떤 검색어/연도가 문제였는지 호출자가 알 수 있어야 하기 때문입니다.
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AppError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "invalid_argument"),
            AppError::ConnectionUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "connection_unavailable")
            }
            AppError::EngineQuery(_) => (StatusCode::INTERNAL_SERVER_ERROR, "engine_query_error"),
            AppError::Transport(_) => (StatusCode::INTERNAL_SERVER_ERROR, "engine_transport_error"),
            AppError::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, "json_error"),
            AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
        };

        // 5xx는 서버 로그에도 남깁니다. 4xx는 호출자 실수이므로 debug 수준이면 충분합니다.
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        // 결과: { "error": { "code": "invalid_argument", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
