use serde::{Deserialize, Serialize};
use crate::core::errors::{FieldError, ValidationErrors};
use crate::models::domain::Match;

/// Response for the list matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMatchesResponse {
    pub data: Vec<Match>,
    pub count: usize,
}

/// Response wrapping a single match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub data: Match,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Validation failure response, keeping per-field detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub errors: Vec<FieldError>,
    pub status_code: u16,
    pub correlation_id: String,
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        let message = match errors.errors.as_slice() {
            [only] => format!("Validation failed for field '{}'", only.field),
            many => format!("Validation failed for {} fields", many.len()),
        };

        Self {
            error: "Validation failed".to_string(),
            message,
            errors: errors.errors,
            status_code: 400,
            correlation_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}
