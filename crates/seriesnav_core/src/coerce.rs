//! Coercion of resolved values into the primitive kinds the sorter,
//! collector and templates work with.
//!
//! | Kind          | Valid input                                       |
//! |---------------|---------------------------------------------------|
//! | order number  | number, or numeric string                         |
//! | date          | RFC 3339, common date formats, bare year, millis  |
//! | series name   | non-blank string, number, boolean                 |
//! | draft         | `true` only                                       |
//!
//! Anything else is "invalid" and sorts after every valid value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Numeric order, or `None` when invalid.
pub fn order_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { s.parse::<f64>().ok() }
        }
        _ => None,
    }?;
    (!number.is_nan()).then_some(number)
}

/// Date as milliseconds since the epoch, or `None` when invalid.
///
/// Naive values are taken as UTC.
pub fn date_millis(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => parse_date(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return midnight_millis(date);
        }
    }
    // A bare year, e.g. "1" or "2019".
    if s.len() <= 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight_millis);
    }
    None
}

fn midnight_millis(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Series name, or `None` when the document is not in a series.
pub fn series_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Plain text of a primitive value (used for slugs and titles).
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Draft flag. Only a literal `true` marks a draft.
pub fn is_draft(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}
