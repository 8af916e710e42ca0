//! The `timestamp` format.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::{AttributeFormat, blank_value, ensure_format, is_blank, value_kind};
use crate::error::{ValidationError, ValidationResult};
use crate::schema::types::AttributeDefinition;

/// Points in time, normalized to milliseconds since the Unix epoch.
///
/// Text is tried in order as: an integer count of milliseconds, RFC 3339,
/// RFC 2822 (which covers RFC 1123), and finally an ISO 8601 date-time or date
/// without offset, read as UTC. The first successful parse wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampFormat;

impl TimestampFormat {
    pub const NAME: &'static str = "timestamp";
}

/// Parse timestamp text into epoch milliseconds.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();

    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<i64>().ok();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

impl AttributeFormat for TimestampFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, attribute: &AttributeDefinition, value: &mut Value) -> ValidationResult<()> {
        ensure_format(Self::NAME, attribute)?;

        if is_blank(value) {
            return blank_value(attribute);
        }

        let millis = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(text) => parse_timestamp(text),
            other => {
                return Err(ValidationError::invalid_type(
                    attribute.label(),
                    "timestamp",
                    value_kind(other),
                ));
            }
        };

        let millis = millis.ok_or_else(|| ValidationError::InvalidTimestamp {
            attribute: attribute.label().to_string(),
            value: match &*value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            },
        })?;

        *value = Value::from(millis);
        Ok(())
    }
}
