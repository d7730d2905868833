//! # 페이지 계산
//!
//! 검색 엔진이 돌려준 전체 결과 수로 클라이언트에 보여줄 전체 페이지 수를 구합니다.

use crate::error::AppError;

/// 전체 결과 수와 페이지 크기로 전체 페이지 수를 계산합니다.
///
/// 올림 나눗셈 `ceil(total_hits / limit)`을 정수 연산으로만 수행합니다.
/// `u64::div_ceil`은 `(total_hits + limit - 1) / limit`과 같은 값을 내지만 덧셈 오버플로가 없습니다.
///
/// 결과가 없으면(`total_hits == 0`) 0페이지입니다.
///
/// # 에러
/// `limit == 0`이면 `AppError::InvalidArgument`
pub fn max_pages(total_hits: u64, limit: u64) -> Result<u64, AppError> {
    if limit == 0 {
        return Err(AppError::InvalidArgument(
            "limit must be positive".to_string(),
        ));
    }
    Ok(total_hits.div_ceil(limit))
}
