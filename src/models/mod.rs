// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DemoUser, Match, MatchStatus};
pub use requests::{CreateMatchRequest, ListMatchesQuery, MatchIdParam, UpdateScoreRequest, MAX_LIST_LIMIT};
pub use responses::{ErrorResponse, HealthResponse, ListMatchesResponse, MatchResponse, ValidationErrorResponse};
