// Unit tests for Matchboard request validation

use matchboard::core::{
    coerce::{coerce_integer, parse_timestamp},
    validators::{
        validate_create_match, validate_list_matches_query, validate_match_id_param,
        validate_update_score,
    },
    Record, ValidationErrorKind,
};
use serde_json::{json, Value};

fn record(value: Value) -> Record {
    serde_json::from_value(value).expect("test input must be a JSON object")
}

#[test]
fn test_limit_out_of_range_values_fail() {
    for limit in [json!(0), json!(101), json!(-5), json!("0"), json!("101")] {
        let err = validate_list_matches_query(&record(json!({ "limit": limit }))).unwrap_err();
        assert!(
            err.has("limit", ValidationErrorKind::OutOfRange),
            "limit {:?} should be out of range",
            limit
        );
    }
}

#[test]
fn test_limit_non_numeric_fails_with_type_error() {
    let err = validate_list_matches_query(&record(json!({"limit": "abc"}))).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.errors[0].kind, ValidationErrorKind::InvalidType);
    assert_eq!(err.errors[0].field, "limit");
}

#[test]
fn test_limit_edges_succeed() {
    let low = validate_list_matches_query(&record(json!({"limit": 1}))).unwrap();
    let high = validate_list_matches_query(&record(json!({"limit": "100"}))).unwrap();
    assert_eq!(low.limit, Some(1));
    assert_eq!(high.limit, Some(100));
}

#[test]
fn test_null_limit_is_absent() {
    let query = validate_list_matches_query(&record(json!({"limit": null}))).unwrap();
    assert_eq!(query.limit, None);
}

#[test]
fn test_match_id_rejects_non_positive() {
    for id in [json!(0), json!(-1)] {
        let err = validate_match_id_param(&record(json!({ "id": id }))).unwrap_err();
        assert!(err.has("id", ValidationErrorKind::OutOfRange));
    }
}

#[test]
fn test_match_id_coerces_numeric_string() {
    let param = validate_match_id_param(&record(json!({"id": "3"}))).unwrap();
    assert_eq!(param.id, 3);
}

#[test]
fn test_match_id_large_text_is_not_rounded() {
    let param = validate_match_id_param(&record(json!({"id": "9007199254740993"}))).unwrap();
    assert_eq!(param.id, 9_007_199_254_740_993);

    let param = validate_match_id_param(&record(json!({"id": "9223372036854775807"}))).unwrap();
    assert_eq!(param.id, i64::MAX);
}

#[test]
fn test_update_score_negative_fails() {
    let err = validate_update_score(&record(json!({"homeScore": -1, "awayScore": 2}))).unwrap_err();
    assert!(err.has("homeScore", ValidationErrorKind::OutOfRange));
    assert!(!err.has("awayScore", ValidationErrorKind::OutOfRange));
}

#[test]
fn test_update_score_zero_zero_succeeds() {
    let req = validate_update_score(&record(json!({"homeScore": 0, "awayScore": 0}))).unwrap();
    assert_eq!(req.home_score, 0);
    assert_eq!(req.away_score, 0);
}

#[test]
fn test_update_score_rejects_values_beyond_column_range() {
    let err = validate_update_score(&record(json!({"homeScore": 3_000_000_000u64, "awayScore": 0}))).unwrap_err();
    assert!(err.has("homeScore", ValidationErrorKind::OutOfRange));
}

#[test]
fn test_create_match_missing_field_reported_at_path() {
    for missing in ["sport", "homeTeam", "awayTeam", "startTime", "endTime"] {
        let mut body = json!({
            "sport": "basketball",
            "homeTeam": "Lakers",
            "awayTeam": "Celtics",
            "startTime": "2024-03-01T19:00:00Z",
            "endTime": "2024-03-01T21:30:00Z",
        });
        body.as_object_mut().unwrap().remove(missing);

        let err = validate_create_match(&record(body)).unwrap_err();
        assert_eq!(err.len(), 1, "only {} should fail", missing);
        assert!(err.has(missing, ValidationErrorKind::MissingField));
    }
}

#[test]
fn test_create_match_both_dates_invalid() {
    let err = validate_create_match(&record(json!({
        "sport": "tennis",
        "homeTeam": "Alcaraz",
        "awayTeam": "Sinner",
        "startTime": "yesterday",
        "endTime": "tomorrow",
    })))
    .unwrap_err();

    assert_eq!(err.len(), 2);
    assert!(err.has("startTime", ValidationErrorKind::InvalidFormat));
    assert!(err.has("endTime", ValidationErrorKind::InvalidFormat));
}

#[test]
fn test_coerce_integer_fraction_is_type_error() {
    let err = coerce_integer("limit", &json!("10.5"), 1, 100).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::InvalidType);
}

#[test]
fn test_parse_timestamp_normalizes_offsets() {
    let a = parse_timestamp("2024-06-01T12:00:00+02:00").unwrap();
    let b = parse_timestamp("2024-06-01T10:00:00Z").unwrap();
    assert_eq!(a, b);
}
