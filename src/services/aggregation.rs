//! # 집계 결과 추출
//!
//! 검색 엔진의 중첩된 집계 응답에서 연도별 문서 수를 꺼냅니다.
//!
//! ```text
//! response
//! └─ aggregations          (없을 수 있음)
//!    └─ docs_per_year      (없을 수 있음)
//!       └─ buckets[]       (없을 수 있음)
//!          ├─ key_as_string: "2020"
//!          └─ doc_count: 5
//! ```
//!
//! 검색 결과가 0건이거나 `filter_path`가 빈 부분을 잘라내면 중간 키가 통째로 빠집니다.
//! 이는 정상적인 경우이므로 에러가 아니라 빈 히스토그램으로 처리합니다.

use crate::models::YearHistogram;
use crate::services::query::DOCS_PER_YEAR_AGG;
use serde_json::Value;

/// 집계 응답을 연도 → 문서 수 매핑으로 평탄화합니다.
///
/// 버킷 순서(오름차순 연도)를 그대로 유지합니다.
/// `key_as_string`이 문자열이 아니거나 `doc_count`가 음이 아닌 정수가 아닌 버킷은 건너뜁니다.
pub fn extract_year_counts(response: &Value) -> YearHistogram {
    // and_then 체인: 어느 단계에서든 None이 나오면 이후 단계는 실행되지 않고 None이 됩니다.
    let Some(buckets) = response
        .get("aggregations")
        .and_then(|aggs| aggs.get(DOCS_PER_YEAR_AGG))
        .and_then(|histogram| histogram.get("buckets"))
        .and_then(Value::as_array)
    else {
        return YearHistogram::new();
    };

    buckets
        .iter()
        .filter_map(|bucket| {
            let year = bucket.get("key_as_string")?.as_str()?;
            let count = bucket.get("doc_count")?.as_u64()?;
            Some((year.to_string(), count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_gives_empty_histogram() {
        assert!(extract_year_counts(&json!({})).is_empty());
    }

    #[test]
    fn missing_levels_give_empty_histogram() {
        for response in [
            json!({ "aggregations": {} }),
            json!({ "aggregations": { "docs_per_year": {} } }),
            json!({ "aggregations": { "docs_per_year": { "buckets": null } } }),
            json!({ "aggregations": { "other_agg": { "buckets": [] } } }),
            json!(null),
        ] {
            assert!(extract_year_counts(&response).is_empty(), "{response}");
        }
    }

    #[test]
    fn buckets_are_flattened_in_order() {
        let response = json!({
            "aggregations": {
                "docs_per_year": {
                    "buckets": [
                        { "key_as_string": "2020", "key": 1577836800000u64, "doc_count": 5 },
                        { "key_as_string": "2021", "key": 1609459200000u64, "doc_count": 3 }
                    ]
                }
            }
        });

        let histogram = extract_year_counts(&response);
        assert_eq!(histogram.years().collect::<Vec<_>>(), vec!["2020", "2021"]);
        assert_eq!(histogram.get("2020"), Some(5));
        assert_eq!(histogram.get("2021"), Some(3));
        assert_eq!(
            serde_json::to_string(&histogram).unwrap(),
            r#"{"2020":5,"2021":3}"#
        );
    }

    #[test]
    fn malformed_buckets_are_skipped() {
        let response = json!({
            "aggregations": {
                "docs_per_year": {
                    "buckets": [
                        { "key_as_string": "1996", "doc_count": 2 },
                        { "key": 820454400000u64, "doc_count": 9 },
                        { "key_as_string": "1998", "doc_count": -1 },
                        { "key_as_string": "1999", "doc_count": 0 }
                    ]
                }
            }
        });

        let histogram = extract_year_counts(&response);
        assert_eq!(histogram.years().collect::<Vec<_>>(), vec!["1996", "1999"]);
        assert_eq!(histogram.get("1999"), Some(0));
    }
}
