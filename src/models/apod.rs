use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// APOD(Astronomy Picture of the Day) 레코드 하나
///
/// 검색에 쓰이는 `date`, `title`, `explanation`만 타입으로 두고,
/// `url`, `hdurl`, `media_type`, `copyright` 같은 나머지 필드는 `extra`에 그대로 보존합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apod {
    /// "1995-06-16" 형식. chrono가 파싱하므로 잘못된 날짜는 적재 단계에서 걸러집니다.
    pub date: NaiveDate,
    pub title: String,
    pub explanation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_fields() {
        let raw = json!({
            "date": "2020-07-04",
            "title": "Comet NEOWISE",
            "explanation": "A comet over the horizon.",
            "media_type": "image",
            "hdurl": "https://apod.nasa.gov/apod/image/neowise.jpg"
        });

        let apod: Apod = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(apod.date, NaiveDate::from_ymd_opt(2020, 7, 4).unwrap());
        assert_eq!(apod.extra["media_type"], "image");
        assert_eq!(serde_json::to_value(&apod).unwrap(), raw);
    }

    #[test]
    fn rejects_malformed_date() {
        let raw = json!({ "date": "2020-13-40", "title": "t", "explanation": "e" });
        assert!(serde_json::from_value::<Apod>(raw).is_err());
    }
}
