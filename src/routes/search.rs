//! # 검색 API 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/v1/regular_search | 페이지 단위 전문검색 |
//! | GET | /api/v1/get_docs_per_year_count/ | 검색어와 일치하는 문서 수 (연도별) |
//!
//! ## 사용 예시
//! ```text
//! GET /api/v1/regular_search?search_query=mars
//! GET /api/v1/regular_search?search_query=mars&skip=10&limit=10&year=2019
//! GET /api/v1/get_docs_per_year_count/?search_query=mars
//! ```

use crate::{
    error::AppError,
    models::{HistogramParams, SearchParams, SearchRequest, YearHistogram},
    routes::AppState,
    services,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// 연도별 문서 수 응답 본문
///
/// `json!` 매크로를 쓰면 `serde_json::Map`(BTreeMap)을 거치면서 키가 다시 정렬되므로,
/// 히스토그램의 버킷 순서를 그대로 유지하려고 구조체로 직접 직렬화합니다.
#[derive(Debug, Serialize)]
pub struct DocsPerYearResponse {
    pub docs_per_year: YearHistogram,
}

/// 페이지 단위 검색을 수행합니다.
///
/// `GET /api/v1/regular_search?search_query=...&skip=0&limit=10&year=2019`
/// → `{ "hits": [...], "max_pages": 3 }`
///
/// ## 에러 처리
/// - `skip < 0`, `limit <= 0`: 검색 엔진을 호출하지 않고 400 반환
/// - 숫자가 아닌 `skip`/`limit`, `search_query` 누락: 같은 400 JSON 에러 형식으로 반환
/// - 검색 엔진 에러(잘못된 연도 형식 등): 엔진의 상세 메시지와 함께 500 반환
pub async fn regular_search(
    State(state): State<AppState>,
    // Result<Query<T>, QueryRejection>: 파싱 실패를 Axum이 바로 응답하지 않고 핸들러에 넘겨줍니다.
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params?;
    let request = SearchRequest::from_params(params)?;
    let result = services::search(state.engine.as_ref(), &request).await?;

    Ok(Json(json!({
        "hits": result.hits,
        "max_pages": result.max_pages
    })))
}

/// 검색어와 일치하는 문서 수를 연도별로 돌려줍니다.
///
/// `GET /api/v1/get_docs_per_year_count/?search_query=mars`
/// → `{ "docs_per_year": { "2019": 15, "2020": 10 } }`
///
/// 다른 핸들러와 달리 `AppError`를 그대로 전파하지 않습니다.
/// 어떤 실패든 여기서 잡아 500 상태와 함께 에러 내용을 일반 텍스트로 돌려줍니다.
pub async fn get_docs_per_year_count(
    State(state): State<AppState>,
    Query(params): Query<HistogramParams>,
) -> Response {
    match services::year_histogram(state.engine.as_ref(), &params.search_query).await {
        Ok(histogram) => Json(DocsPerYearResponse {
            docs_per_year: histogram,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(query = %params.search_query, error = %e, "Year histogram failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
