//! Matchboard - match fixtures service with strict request validation
//!
//! The validators in [`core`] turn untyped input records (query strings,
//! route parameters, JSON bodies) into typed requests or a list of
//! field-level errors. The rest of the crate is the HTTP surface and the
//! PostgreSQL store that consume them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{FieldError, Record, ValidateRecord, ValidationErrorKind, ValidationErrors};
pub use models::{CreateMatchRequest, ListMatchesQuery, Match, MatchIdParam, MatchStatus, UpdateScoreRequest};
