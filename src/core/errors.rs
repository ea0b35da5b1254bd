use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a single field failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Required field absent, null, or an empty string
    MissingField,
    /// Value of the wrong type or not coercible to the target type
    InvalidType,
    /// Coerced value outside its declared bounds
    OutOfRange,
    /// Text that does not parse as a calendar timestamp
    InvalidFormat,
    /// Cross-field ordering violation
    OutOfOrder,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingField => "missing_field",
            ValidationErrorKind::InvalidType => "invalid_type",
            ValidationErrorKind::OutOfRange => "out_of_range",
            ValidationErrorKind::InvalidFormat => "invalid_format",
            ValidationErrorKind::OutOfOrder => "out_of_order",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub kind: ValidationErrorKind,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        kind: ValidationErrorKind,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("{} is required", field), ValidationErrorKind::MissingField)
    }

    pub fn invalid_type(field: &str, expected: &str) -> Self {
        Self::new(
            field,
            format!("{} must be {}", field, expected),
            ValidationErrorKind::InvalidType,
        )
    }

    pub fn out_of_range(field: &str, message: impl Into<String>) -> Self {
        Self::new(field, message, ValidationErrorKind::OutOfRange)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.kind)
    }
}

/// All failures found on one input, in the order they were checked
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation failed for {} field(s): {}", .errors.len(), summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors reported against the given field path
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Whether an error of `kind` was reported for `field`
    pub fn has(&self, field: &str, kind: ValidationErrorKind) -> bool {
        self.for_field(field).any(|e| e.kind == kind)
    }
}

/// Accumulates field errors across independent checks
///
/// Mirrors a builder: each check records its failure and yields `None`,
/// so later checks still run and every failure is reported together.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<FieldError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Record the error of a failed check, passing a success through
    pub fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.push(error);
                None
            }
        }
    }

    pub fn push(&mut self, error: FieldError) -> &mut Self {
        self.errors.push(error);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Finish, returning `value` only if nothing failed
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(ValidationErrors::new(self.errors));
        }
        // Every check passed, so every collected value is present.
        value().ok_or_else(|| ValidationErrors::new(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ValidationErrorKind::OutOfOrder).unwrap();
        assert_eq!(json, "\"out_of_order\"");
        assert_eq!(ValidationErrorKind::MissingField.to_string(), "missing_field");
    }

    #[test]
    fn test_collector_keeps_going_after_failure() {
        let mut collector = ErrorCollector::new();

        let a = collector.check::<i64>(Err(FieldError::missing("sport")));
        let b = collector.check::<i64>(Ok(3));
        collector.push(FieldError::out_of_range("limit", "limit must be at most 100"));

        assert!(a.is_none());
        assert_eq!(b, Some(3));
        assert!(collector.has_errors());

        let errors = collector.finish(|| Some(())).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors[0].field, "sport");
        assert_eq!(errors.errors[1].field, "limit");
    }

    #[test]
    fn test_error_display_lists_fields() {
        let errors = ValidationErrors::new(vec![
            FieldError::missing("sport"),
            FieldError::invalid_type("limit", "an integer"),
        ]);
        let text = errors.to_string();
        assert!(text.contains("2 field(s)"));
        assert!(text.contains("sport: sport is required (missing_field)"));
        assert!(text.contains("limit must be an integer"));
    }
}
