use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest page size a client may request
pub const MAX_LIST_LIMIT: u32 = 100;

/// Query for listing matches
///
/// GET /api/v1/matches?limit={limit}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMatchesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Route parameter identifying a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchIdParam {
    pub id: i64,
}

/// Request to create a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub sport: String,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "homeScore", skip_serializing_if = "Option::is_none")]
    pub home_score: Option<i32>,
    #[serde(rename = "awayScore", skip_serializing_if = "Option::is_none")]
    pub away_score: Option<i32>,
}

/// Request to overwrite a match's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateScoreRequest {
    #[serde(rename = "homeScore")]
    pub home_score: i32,
    #[serde(rename = "awayScore")]
    pub away_score: i32,
}
