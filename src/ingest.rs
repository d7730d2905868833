//! # APOD 데이터 적재
//!
//! APOD JSON 덤프(레코드 배열)를 읽어 검색 인덱스를 새로 만들고 벌크로 적재합니다.
//! `src/bin/index_data.rs`가 이 모듈을 사용합니다.

use crate::engine::elastic::{BulkSummary, ElasticClient};
use crate::error::AppError;
use crate::models::Apod;
use std::path::Path;

/// 한 번의 `_bulk` 요청에 담을 문서 수
pub const BATCH_SIZE: usize = 500;

/// JSON 파일에서 APOD 레코드 배열을 읽습니다.
///
/// 날짜가 잘못되었거나 필수 필드가 없는 레코드가 하나라도 있으면 전체가 실패합니다.
/// 부분 적재된 인덱스보다 아예 적재되지 않은 편이 원인을 찾기 쉽기 때문입니다.
pub async fn load_apod_file(path: impl AsRef<Path>) -> Result<Vec<Apod>, AppError> {
    let raw = tokio::fs::read(path.as_ref()).await?;
    parse_apod_records(&raw)
}

pub fn parse_apod_records(raw: &[u8]) -> Result<Vec<Apod>, AppError> {
    Ok(serde_json::from_slice(raw)?)
}

/// 인덱스를 다시 만들고 문서를 `batch_size`개씩 나누어 적재합니다.
pub async fn index_documents(
    client: &ElasticClient,
    documents: &[Apod],
    batch_size: usize,
) -> Result<BulkSummary, AppError> {
    client.recreate_index().await?;

    let mut summary = BulkSummary::default();
    // chunks(0)은 패닉하므로 최소 1로 맞춥니다.
    for (batch_no, batch) in documents.chunks(batch_size.max(1)).enumerate() {
        let result = client.bulk_index(batch).await?;
        summary.indexed += result.indexed;
        summary.failed += result.failed;

        tracing::info!(
            batch = batch_no + 1,
            indexed = summary.indexed,
            total = documents.len(),
            "Indexing documents"
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_apod_array() {
        let raw = br#"[
            {"date": "1995-06-16", "title": "Neutron Star Earth", "explanation": "Gravity bends light.", "media_type": "image"},
            {"date": "2020-07-04", "title": "Comet NEOWISE", "explanation": "A comet."}
        ]"#;

        let records = parse_apod_records(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Neutron Star Earth");
        assert_eq!(records[1].date.to_string(), "2020-07-04");
    }

    #[test]
    fn one_bad_record_fails_the_file() {
        let raw = br#"[
            {"date": "1995-06-16", "title": "ok", "explanation": "ok"},
            {"date": "yesterday", "title": "bad", "explanation": "bad"}
        ]"#;

        assert!(matches!(parse_apod_records(raw), Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = load_apod_file("/nonexistent/apod.json").await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
