//! Lenient field decoders for records coming back from the HRMS API.
//!
//! The backend is loose about shapes: ids may be strings or numbers, dates may
//! be `YYYY-MM-DD`, full ISO-8601 timestamps or epoch milliseconds. Everything
//! here decodes to `None` rather than failing the whole collection.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Calendar-day truncation of a raw date value.
///
/// Strings keep only their first ten characters (no timezone normalization);
/// numbers are read as epoch milliseconds in UTC.
pub fn truncate_to_day(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(raw) => parse_day(raw),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

pub fn day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(truncate_to_day))
}

pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn iso_timestamp_keeps_calendar_day_only() {
        let day = truncate_to_day(&json!("2024-02-29T23:59:59.000Z"));
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn epoch_millis_are_read_as_utc() {
        // 2024-02-01T00:00:00Z
        let day = truncate_to_day(&json!(1_706_745_600_000_i64));
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn garbage_dates_are_absent() {
        assert_eq!(truncate_to_day(&json!("")), None);
        assert_eq!(truncate_to_day(&json!("2024-2-1")), None);
        assert_eq!(truncate_to_day(&json!("not a date at all")), None);
        assert_eq!(truncate_to_day(&json!(true)), None);
        assert_eq!(truncate_to_day(&Value::Null), None);
    }
}
