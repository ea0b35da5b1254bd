//! Explicit coercion of untyped input values into typed fields.
//!
//! Accepted as numbers: JSON numbers, and strings whose trimmed content
//! parses as a finite decimal number. Everything else (booleans, arrays,
//! objects, empty strings, `NaN`/`inf`) is a type error. JSON `null` is
//! treated the same as an absent field.

use crate::core::errors::{FieldError, ValidationErrorKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// An untyped input record: decoded query parameters, a route parameter,
/// or a JSON request body
pub type Record = Map<String, Value>;

/// Local date-time layouts accepted without an offset, read as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Look up a field, treating `null` as absent
pub fn field<'a>(input: &'a Record, name: &str) -> Option<&'a Value> {
    match input.get(name) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Coerce a value to a finite number
pub fn coerce_number(name: &str, value: &Value) -> Result<f64, FieldError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(FieldError::invalid_type(name, "a number")),
    }
}

/// Coerce a value to an integer within `[min, max]`
///
/// A non-integral number is a type error; an integer outside the bounds
/// is a range error.
pub fn coerce_integer(name: &str, value: &Value, min: i64, max: i64) -> Result<i64, FieldError> {
    // Exact paths for integer numbers and integer text, so large ids don't
    // round through f64.
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return check_bounds(name, i, min, max);
            }
            if n.as_u64().is_some() {
                return Err(FieldError::out_of_range(name, too_large(name, max)));
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return check_bounds(name, i, min, max);
            }
            if let Ok(wide) = trimmed.parse::<i128>() {
                return Err(if wide < 0 {
                    FieldError::out_of_range(name, too_small(name, min))
                } else {
                    FieldError::out_of_range(name, too_large(name, max))
                });
            }
        }
        _ => {}
    }

    let number = coerce_number(name, value)?;
    if number.fract() != 0.0 {
        return Err(FieldError::invalid_type(name, "an integer"));
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if number >= i64::MAX as f64 {
        return Err(FieldError::out_of_range(name, too_large(name, max)));
    }
    if number < i64::MIN as f64 {
        return Err(FieldError::out_of_range(name, too_small(name, min)));
    }

    check_bounds(name, number as i64, min, max)
}

fn check_bounds(name: &str, value: i64, min: i64, max: i64) -> Result<i64, FieldError> {
    if value < min {
        Err(FieldError::out_of_range(name, too_small(name, min)))
    } else if value > max {
        Err(FieldError::out_of_range(name, too_large(name, max)))
    } else {
        Ok(value)
    }
}

fn too_small(name: &str, min: i64) -> String {
    match min {
        0 => format!("{} must be non-negative", name),
        1 => format!("{} must be positive", name),
        _ => format!("{} must be at least {}", name, min),
    }
}

fn too_large(name: &str, max: i64) -> String {
    format!("{} must be at most {}", name, max)
}

/// Required non-empty text
pub fn required_text(input: &Record, name: &str) -> Result<String, FieldError> {
    match field(input, name) {
        None => Err(FieldError::missing(name)),
        Some(Value::String(s)) if s.is_empty() => Err(FieldError::missing(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(FieldError::invalid_type(name, "a string")),
    }
}

/// Required text resolvable to an absolute instant
pub fn required_timestamp(input: &Record, name: &str) -> Result<DateTime<Utc>, FieldError> {
    match field(input, name) {
        None => Err(FieldError::missing(name)),
        Some(Value::String(s)) => parse_timestamp(s).ok_or_else(|| {
            FieldError::new(
                name,
                format!("{} must be a valid ISO date string", name),
                ValidationErrorKind::InvalidFormat,
            )
        }),
        Some(_) => Err(FieldError::invalid_type(name, "a string")),
    }
}

/// Parse a calendar timestamp, resolving it to UTC
///
/// Accepts RFC 3339, ISO 8601 local date-times (read as UTC), bare
/// calendar dates (midnight UTC) and RFC 2822.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
