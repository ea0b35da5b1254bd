use crate::core::coerce::{coerce_integer, field, required_text, required_timestamp, Record};
use crate::core::errors::{ErrorCollector, FieldError, ValidationErrorKind, ValidationErrors};
use crate::models::requests::{
    CreateMatchRequest, ListMatchesQuery, MatchIdParam, UpdateScoreRequest, MAX_LIST_LIMIT,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Types that can be built from an untyped input record
///
/// Validation is pure: the same record always yields the same result,
/// and every independently checkable failure is reported in one call.
pub trait ValidateRecord: Sized {
    fn validate(input: &Record) -> Result<Self, ValidationErrors>;

    /// Validate an arbitrary JSON value, which must be an object
    fn validate_value(input: &Value) -> Result<Self, ValidationErrors> {
        match input {
            Value::Object(record) => Self::validate(record),
            _ => Err(ValidationErrors::single(FieldError::invalid_type(
                "body",
                "a JSON object",
            ))),
        }
    }
}

fn optional_score(
    errors: &mut ErrorCollector,
    input: &Record,
    name: &str,
) -> Option<Option<i32>> {
    match field(input, name) {
        None => Some(None),
        Some(value) => errors
            .check(coerce_integer(name, value, 0, i32::MAX as i64))
            .map(|score| Some(score as i32)),
    }
}

fn required_score(errors: &mut ErrorCollector, input: &Record, name: &str) -> Option<i32> {
    let score = match field(input, name) {
        None => Err(FieldError::missing(name)),
        Some(value) => coerce_integer(name, value, 0, i32::MAX as i64),
    };
    errors.check(score).map(|s| s as i32)
}

/// End must be strictly after start; equal instants are rejected
pub fn check_chronological(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<(), FieldError> {
    if end_time <= start_time {
        return Err(FieldError::new(
            "endTime",
            "endTime must be chronologically after startTime",
            ValidationErrorKind::OutOfOrder,
        ));
    }
    Ok(())
}

impl ValidateRecord for ListMatchesQuery {
    fn validate(input: &Record) -> Result<Self, ValidationErrors> {
        let limit = match field(input, "limit") {
            None => None,
            Some(value) => Some(
                coerce_integer("limit", value, 1, MAX_LIST_LIMIT as i64)
                    .map_err(ValidationErrors::single)? as u32,
            ),
        };

        Ok(Self { limit })
    }
}

impl ValidateRecord for MatchIdParam {
    fn validate(input: &Record) -> Result<Self, ValidationErrors> {
        let id = match field(input, "id") {
            None => return Err(ValidationErrors::single(FieldError::missing("id"))),
            Some(value) => coerce_integer("id", value, 1, i64::MAX).map_err(ValidationErrors::single)?,
        };

        Ok(Self { id })
    }
}

impl ValidateRecord for CreateMatchRequest {
    fn validate(input: &Record) -> Result<Self, ValidationErrors> {
        let mut errors = ErrorCollector::new();

        let sport = errors.check(required_text(input, "sport"));
        let home_team = errors.check(required_text(input, "homeTeam"));
        let away_team = errors.check(required_text(input, "awayTeam"));

        let start_time = errors.check(required_timestamp(input, "startTime"));
        let end_time = errors.check(required_timestamp(input, "endTime"));

        let home_score = optional_score(&mut errors, input, "homeScore");
        let away_score = optional_score(&mut errors, input, "awayScore");

        // Cross-field stage: only once both instants parsed on their own.
        if let (Some(start), Some(end)) = (start_time, end_time) {
            errors.check(check_chronological(start, end));
        }

        errors.finish(|| {
            Some(Self {
                sport: sport?,
                home_team: home_team?,
                away_team: away_team?,
                start_time: start_time?,
                end_time: end_time?,
                home_score: home_score?,
                away_score: away_score?,
            })
        })
    }
}

impl ValidateRecord for UpdateScoreRequest {
    fn validate(input: &Record) -> Result<Self, ValidationErrors> {
        let mut errors = ErrorCollector::new();

        let home_score = required_score(&mut errors, input, "homeScore");
        let away_score = required_score(&mut errors, input, "awayScore");

        errors.finish(|| {
            Some(Self {
                home_score: home_score?,
                away_score: away_score?,
            })
        })
    }
}

/// Validate a list-matches query
pub fn validate_list_matches_query(input: &Record) -> Result<ListMatchesQuery, ValidationErrors> {
    ListMatchesQuery::validate(input)
}

/// Validate a match id route parameter
pub fn validate_match_id_param(input: &Record) -> Result<MatchIdParam, ValidationErrors> {
    MatchIdParam::validate(input)
}

/// Validate a create-match body
pub fn validate_create_match(input: &Record) -> Result<CreateMatchRequest, ValidationErrors> {
    CreateMatchRequest::validate(input)
}

/// Validate an update-score body
pub fn validate_update_score(input: &Record) -> Result<UpdateScoreRequest, ValidationErrors> {
    UpdateScoreRequest::validate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    fn valid_match() -> Value {
        json!({
            "sport": "football",
            "homeTeam": "Arsenal",
            "awayTeam": "Chelsea",
            "startTime": "2024-01-01T10:00:00Z",
            "endTime": "2024-01-01T12:00:00Z",
        })
    }

    #[test]
    fn test_limit_bounds() {
        for bad in [json!(0), json!(101), json!(-5), json!("abc")] {
            let input = record(json!({ "limit": bad }));
            assert!(validate_list_matches_query(&input).is_err(), "limit {:?}", bad);
        }

        let ok = validate_list_matches_query(&record(json!({"limit": 100}))).unwrap();
        assert_eq!(ok.limit, Some(100));
        let ok = validate_list_matches_query(&record(json!({"limit": "1"}))).unwrap();
        assert_eq!(ok.limit, Some(1));
    }

    #[test]
    fn test_limit_error_kinds() {
        let err = validate_list_matches_query(&record(json!({"limit": "abc"}))).unwrap_err();
        assert!(err.has("limit", ValidationErrorKind::InvalidType));

        let err = validate_list_matches_query(&record(json!({"limit": 101}))).unwrap_err();
        assert!(err.has("limit", ValidationErrorKind::OutOfRange));

        let err = validate_list_matches_query(&record(json!({"limit": 2.5}))).unwrap_err();
        assert!(err.has("limit", ValidationErrorKind::InvalidType));
    }

    #[test]
    fn test_limit_absent() {
        let ok = validate_list_matches_query(&Record::new()).unwrap();
        assert_eq!(ok.limit, None);
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({}));
    }

    #[test]
    fn test_match_id() {
        for bad in [json!(0), json!(-1), json!("0")] {
            let err = validate_match_id_param(&record(json!({ "id": bad }))).unwrap_err();
            assert!(err.has("id", ValidationErrorKind::OutOfRange));
        }

        let ok = validate_match_id_param(&record(json!({"id": "3"}))).unwrap();
        assert_eq!(ok.id, 3);

        let err = validate_match_id_param(&Record::new()).unwrap_err();
        assert!(err.has("id", ValidationErrorKind::MissingField));

        let err = validate_match_id_param(&record(json!({"id": "x"}))).unwrap_err();
        assert!(err.has("id", ValidationErrorKind::InvalidType));
    }

    #[test]
    fn test_create_match_ok() {
        let mut body = valid_match();
        body["homeScore"] = json!("2");
        body["awayScore"] = json!(1);

        let req = validate_create_match(&record(body)).unwrap();
        assert_eq!(req.sport, "football");
        assert_eq!(req.home_team, "Arsenal");
        assert_eq!(req.away_team, "Chelsea");
        assert_eq!(req.start_time, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
        assert_eq!(req.end_time, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        assert_eq!(req.home_score, Some(2));
        assert_eq!(req.away_score, Some(1));
    }

    #[test]
    fn test_create_match_scores_optional() {
        let req = validate_create_match(&record(valid_match())).unwrap();
        assert_eq!(req.home_score, None);
        assert_eq!(req.away_score, None);
    }

    #[test]
    fn test_create_match_collects_all_errors() {
        let input = record(json!({
            "sport": "",
            "awayTeam": "Chelsea",
            "startTime": "2024-01-01T10:00:00Z",
            "endTime": "2024-01-01T12:00:00Z",
            "homeScore": -1,
            "awayScore": "two",
        }));

        let err = validate_create_match(&input).unwrap_err();
        assert_eq!(err.len(), 4);
        assert!(err.has("sport", ValidationErrorKind::MissingField));
        assert!(err.has("homeTeam", ValidationErrorKind::MissingField));
        assert!(err.has("homeScore", ValidationErrorKind::OutOfRange));
        assert!(err.has("awayScore", ValidationErrorKind::InvalidType));

        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["sport", "homeTeam", "homeScore", "awayScore"]);
    }

    #[test]
    fn test_create_match_end_before_start() {
        let mut body = valid_match();
        body["endTime"] = json!("2024-01-01T09:00:00Z");

        let err = validate_create_match(&record(body)).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has("endTime", ValidationErrorKind::OutOfOrder));
    }

    #[test]
    fn test_create_match_equal_times_rejected() {
        let mut body = valid_match();
        body["endTime"] = json!("2024-01-01T10:00:00Z");

        let err = validate_create_match(&record(body)).unwrap_err();
        assert!(err.has("endTime", ValidationErrorKind::OutOfOrder));

        // Same instant in another offset is still equal
        let mut body = valid_match();
        body["endTime"] = json!("2024-01-01T11:00:00+01:00");
        let err = validate_create_match(&record(body)).unwrap_err();
        assert!(err.has("endTime", ValidationErrorKind::OutOfOrder));
    }

    #[test]
    fn test_create_match_bad_date_skips_order_check() {
        let mut body = valid_match();
        body["startTime"] = json!("not-a-date");

        let err = validate_create_match(&record(body)).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has("startTime", ValidationErrorKind::InvalidFormat));
        assert!(!err.has("endTime", ValidationErrorKind::OutOfOrder));
    }

    #[test]
    fn test_create_match_non_string_time() {
        let mut body = valid_match();
        body["endTime"] = json!(1704103200);

        let err = validate_create_match(&record(body)).unwrap_err();
        assert!(err.has("endTime", ValidationErrorKind::InvalidType));
        assert!(!err.has("endTime", ValidationErrorKind::OutOfOrder));
    }

    #[test]
    fn test_update_score() {
        let err = validate_update_score(&record(json!({"homeScore": -1, "awayScore": 0}))).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has("homeScore", ValidationErrorKind::OutOfRange));

        let ok = validate_update_score(&record(json!({"homeScore": 0, "awayScore": 0}))).unwrap();
        assert_eq!(ok, UpdateScoreRequest { home_score: 0, away_score: 0 });

        let ok = validate_update_score(&record(json!({"homeScore": "3", "awayScore": "1"}))).unwrap();
        assert_eq!(ok.home_score, 3);
        assert_eq!(ok.away_score, 1);
    }

    #[test]
    fn test_update_score_both_missing() {
        let err = validate_update_score(&Record::new()).unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(err.has("homeScore", ValidationErrorKind::MissingField));
        assert!(err.has("awayScore", ValidationErrorKind::MissingField));
    }

    #[test]
    fn test_non_object_body() {
        let err = UpdateScoreRequest::validate_value(&json!([1, 2])).unwrap_err();
        assert!(err.has("body", ValidationErrorKind::InvalidType));
    }
}
