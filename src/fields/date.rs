use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::types::FieldValue;

use super::FieldShape;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y%m%dT%H%M%S"];

/// A date field. Empty or missing dates read as [`DateTime::<Utc>::MIN_UTC`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateField {
    pub value: DateTime<Utc>,
    pub editable: Option<String>,
}

impl DateField {
    pub fn is_unset(&self) -> bool {
        self.value == DateTime::<Utc>::MIN_UTC
    }
}

impl Default for DateField {
    fn default() -> Self {
        Self {
            value: DateTime::<Utc>::MIN_UTC,
            editable: None,
        }
    }
}

impl FieldShape for DateField {
    const SHAPE: &'static str = "date";

    fn reify(value: &FieldValue) -> Option<Self> {
        let date = match value.inner() {
            Value::Null => DateTime::<Utc>::MIN_UTC,
            Value::String(text) if text.trim().is_empty() => DateTime::<Utc>::MIN_UTC,
            Value::String(text) => parse_date(text.trim())?,
            _ => return None,
        };
        Some(DateField {
            value: date,
            editable: value.editable(),
        })
    }
}

/// ISO 8601 / RFC 3339 timestamps, their zone-less forms and the compact `yyyyMMddTHHmmss[Z]` form.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let zoneless = raw.strip_suffix(['Z', 'z']).unwrap_or(raw);
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(zoneless, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    let date = NaiveDate::parse_from_str(zoneless, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
