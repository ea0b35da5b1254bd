use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::Value;
use crate::core::{Record, ValidateRecord, ValidationErrors};
use crate::models::{
    CreateMatchRequest, ErrorResponse, HealthResponse, ListMatchesQuery, ListMatchesResponse,
    MatchIdParam, MatchResponse, MatchStatus, UpdateScoreRequest, ValidationErrorResponse,
    MAX_LIST_LIMIT,
};
use crate::services::{PostgresClient, PostgresError};
use std::collections::HashMap;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub default_limit: u32,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::get().to(list_matches))
        .route("/matches", web::post().to(create_match))
        .route("/matches/{id}", web::get().to(get_match))
        .route("/matches/{id}/score", web::patch().to(update_score));
}

/// Turn decoded query or path parameters into an untyped record
fn params_record(params: HashMap<String, String>) -> Record {
    params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Collect matched route segments (e.g. `{id}`) into an untyped record
fn path_record(req: &HttpRequest) -> Record {
    req.match_info()
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

fn validation_failed(endpoint: &str, errors: ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed for {}: {}", endpoint, errors);
    HttpResponse::BadRequest().json(ValidationErrorResponse::from(errors))
}

fn store_failed(action: &str, err: PostgresError) -> HttpResponse {
    match err {
        PostgresError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: format!("{} does not exist", what),
            status_code: 404,
        }),
        other => {
            tracing::error!("Failed to {}: {}", action, other);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to {}", action),
                message: other.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List matches endpoint
///
/// GET /api/v1/matches?limit={limit}
async fn list_matches(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let query = match ListMatchesQuery::validate(&params_record(query.into_inner())) {
        Ok(q) => q,
        Err(errors) => return validation_failed("list_matches", errors),
    };

    let limit = query
        .limit
        .unwrap_or(state.default_limit)
        .clamp(1, MAX_LIST_LIMIT);

    match state.postgres.list_matches(limit).await {
        Ok(matches) => HttpResponse::Ok().json(ListMatchesResponse {
            count: matches.len(),
            data: matches,
        }),
        Err(e) => store_failed("list matches", e),
    }
}

/// Get match endpoint
///
/// GET /api/v1/matches/{id}
async fn get_match(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> impl Responder {
    let param = match MatchIdParam::validate(&path_record(&req)) {
        Ok(p) => p,
        Err(errors) => return validation_failed("get_match", errors),
    };

    match state.postgres.get_match(param.id).await {
        Ok(found) => HttpResponse::Ok().json(MatchResponse { data: found }),
        Err(e) => store_failed("fetch match", e),
    }
}

/// Create match endpoint
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "sport": "football",
///   "homeTeam": "string",
///   "awayTeam": "string",
///   "startTime": "2024-01-01T10:00:00Z",
///   "endTime": "2024-01-01T12:00:00Z",
///   "homeScore": 0,
///   "awayScore": 0
/// }
/// ```
async fn create_match(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> impl Responder {
    let req = match CreateMatchRequest::validate_value(&body) {
        Ok(r) => r,
        Err(errors) => return validation_failed("create_match", errors),
    };

    let status = MatchStatus::at(req.start_time, req.end_time, chrono::Utc::now());

    match state.postgres.create_match(&req, status).await {
        Ok(created) => HttpResponse::Created().json(MatchResponse { data: created }),
        Err(e) => store_failed("create match", e),
    }
}

/// Update score endpoint
///
/// PATCH /api/v1/matches/{id}/score
///
/// Request body:
/// ```json
/// { "homeScore": 2, "awayScore": 1 }
/// ```
async fn update_score(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> impl Responder {
    // Report path and body failures together.
    let param = MatchIdParam::validate(&path_record(&req));
    let req = UpdateScoreRequest::validate_value(&body);

    let (param, req) = match (param, req) {
        (Ok(p), Ok(r)) => (p, r),
        (p, r) => {
            let mut errors = Vec::new();
            if let Err(e) = p {
                errors.extend(e.errors);
            }
            if let Err(e) = r {
                errors.extend(e.errors);
            }
            return validation_failed("update_score", ValidationErrors::new(errors));
        }
    };

    match state.postgres.update_score(param.id, &req).await {
        Ok(updated) => HttpResponse::Ok().json(MatchResponse { data: updated }),
        Err(e) => store_failed("update score", e),
    }
}
