use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const ALL: &str = "all";

/// Accepts RFC 3339, a bare `YYYY-MM-DD` date, or epoch seconds.
fn deserialize_timestamp_flexible<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        String(String),
    }

    let parsed = match Raw::deserialize(deserializer)? {
        Raw::Int(secs) => Utc.timestamp_opt(secs, 0).single(),
        Raw::Float(secs) => {
            let whole = secs.floor();
            Utc.timestamp_opt(whole as i64, ((secs - whole) * 1e9) as u32)
                .single()
        }
        Raw::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }),
    };

    parsed.ok_or_else(|| serde::de::Error::custom("Invalid timestamp"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(deserialize_with = "deserialize_timestamp_flexible")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn created_at(value: serde_json::Value) -> DateTime<Utc> {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "role": "admin",
            "status": "active",
            "createdAt": value,
        }))
        .unwrap();
        user.created_at
    }

    #[test]
    fn accepts_rfc3339_dates_and_epochs() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(created_at(json!("2024-01-01T00:00:00Z")), expected);
        assert_eq!(created_at(json!("2024-01-01")), expected);
        assert_eq!(created_at(json!(1_704_067_200)), expected);
        assert_eq!(created_at(json!(1_704_067_200.0)), expected);
    }

    #[test]
    fn fractional_epochs_round_toward_the_past() {
        assert_eq!(
            created_at(json!(1.25)),
            Utc.timestamp_opt(1, 250_000_000).unwrap()
        );
        assert_eq!(
            created_at(json!(-1.5)),
            Utc.timestamp_opt(-2, 500_000_000).unwrap()
        );
    }

    #[test]
    fn missing_role_and_status_decode_as_empty() {
        let user: User = serde_json::from_value(json!({
            "id": "u9",
            "createdAt": "2024-03-01",
        }))
        .unwrap();
        assert_eq!(user.role, "");
        assert_eq!(user.status, "");
    }

    #[test]
    fn rejects_garbage_timestamps() {
        let res = serde_json::from_value::<User>(json!({
            "id": "u1",
            "role": "admin",
            "status": "active",
            "createdAt": "last tuesday",
        }));
        assert!(res.is_err());
    }
}
