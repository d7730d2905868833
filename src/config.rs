//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `ELASTICSEARCH_URL`: 검색 엔진 주소 (기본값: `http://localhost:9200`)
//! - `ELASTICSEARCH_USERNAME` / `ELASTICSEARCH_PASSWORD`: Basic 인증 (선택)
//! - `INDEX_NAME`: APOD 문서가 저장된 인덱스 이름 (기본값: `apod`)
//! - `ES_MAX_RETRIES`: 시작 시 연결 시도 횟수 (기본값: 5)
//! - `ES_RETRY_DELAY_SECS`: 연결 시도 사이 대기 시간(초) (기본값: 5)
//! - `ES_REQUEST_TIMEOUT_SECS`: 요청 하나의 제한 시간(초) (기본값: 30)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 검색 엔진 연결에 필요한 설정
///
/// 서버(`main.rs`)와 데이터 적재 도구(`bin/index_data.rs`)가 함께 사용합니다.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Elasticsearch 기본 URL (끝의 `/`는 제거된 상태로 저장)
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 검색 대상 인덱스 이름
    pub index_name: String,
    /// 연결 확인(ping) 최대 시도 횟수. 0이면 1로 취급합니다.
    pub max_retries: u32,
    /// 시도 사이의 고정 대기 시간
    pub retry_delay: Duration,
    /// 요청 하나의 제한 시간
    pub request_timeout: Duration,
}

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Debug, Clone)]
pub struct Config {
    pub engine: EngineConfig,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8000)
    pub port: u16,
    /// 빌드된 프론트엔드 정적 파일 경로. 디렉토리가 있을 때만 서빙합니다.
    pub frontend_dist: String,
}

impl EngineConfig {
    /// 환경변수에서 검색 엔진 설정을 읽습니다.
    ///
    /// 모든 항목에 기본값이 있으므로 실패하지 않습니다.
    /// 숫자 파싱에 실패한 값도 기본값으로 대체됩니다.
    pub fn from_env() -> Self {
        Self {
            url: env::var("ELASTICSEARCH_URL")
                .unwrap_or_else(|_| "http://localhost:9200".to_string())
                .trim_end_matches('/')
                .to_string(),
            // .ok(): Result<String, VarError> → Option<String>
            // 변수가 없으면 None (인증 없이 접속)
            username: env::var("ELASTICSEARCH_USERNAME").ok(),
            password: env::var("ELASTICSEARCH_PASSWORD").ok(),
            index_name: env::var("INDEX_NAME").unwrap_or_else(|_| "apod".to_string()),
            max_retries: parse_or("ES_MAX_RETRIES", 5),
            retry_delay: Duration::from_secs(parse_or("ES_RETRY_DELAY_SECS", 5)),
            request_timeout: Duration::from_secs(parse_or("ES_REQUEST_TIMEOUT_SECS", 30)),
        }
    }
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    pub fn from_env() -> Self {
        Self {
            engine: EngineConfig::from_env(),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 8000),
            frontend_dist: env::var("FRONTEND_DIST")
                .unwrap_or_else(|_| "../frontend/dist".to_string()),
        }
    }
}

/// 환경변수를 읽어 `T`로 파싱하고, 없거나 파싱에 실패하면 `default`를 반환합니다.
///
/// 제네릭 `T: FromStr`: `"5".parse::<u32>()`처럼 문자열에서 변환 가능한 모든 타입에 사용할 수 있습니다.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_and_garbage() {
        assert_eq!(parse_or::<u32>("APOD_SEARCH_TEST_UNSET_VARIABLE", 7), 7);

        env::set_var("APOD_SEARCH_TEST_GARBAGE_PORT", "not-a-port");
        assert_eq!(parse_or::<u16>("APOD_SEARCH_TEST_GARBAGE_PORT", 8000), 8000);

        env::set_var("APOD_SEARCH_TEST_RETRIES", " 3 ");
        assert_eq!(parse_or::<u32>("APOD_SEARCH_TEST_RETRIES", 5), 3);
    }
}
