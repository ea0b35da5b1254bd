// Request validation exports
pub mod coerce;
pub mod errors;
pub mod validators;

pub use coerce::{parse_timestamp, Record};
pub use errors::{ErrorCollector, FieldError, ValidationErrorKind, ValidationErrors};
pub use validators::{
    check_chronological, validate_create_match, validate_list_matches_query,
    validate_match_id_param, validate_update_score, ValidateRecord,
};
