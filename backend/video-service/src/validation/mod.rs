/// Request validation
///
/// Path, query and body inputs are deserialized into the typed schemas in
/// [`schemas`] and checked with `validator` before any repository call.
/// Extractor failures (bad JSON, unparsable path segments) are folded into the
/// same [`AppError::Validation`] category as constraint failures.
use crate::error::{AppError, Result};
use actix_web::web;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError};

pub mod coerce;
pub mod schemas;

// Hardcoded pattern, always valid
static URL_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("hardcoded url code regex is invalid")
});

/// Whether `code` is an 11-character video code
pub fn is_url_code(code: &str) -> bool {
    URL_CODE_REGEX.is_match(code)
}

/// validator compatible check for video url codes
pub fn validate_url_code(code: &str) -> std::result::Result<(), ValidationError> {
    if is_url_code(code) {
        Ok(())
    } else {
        let mut error = ValidationError::new("url_code");
        error.message = Some("must be 11 characters from [a-zA-Z0-9_-]".into());
        Err(error)
    }
}

/// Run the schema's constraints, handing the value back on success
pub fn validated<T: Validate>(value: T) -> Result<T> {
    value.validate()?;
    Ok(value)
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::invalid("body", err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::invalid("path", err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::invalid("query", err.to_string()).into())
}
