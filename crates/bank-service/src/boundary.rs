//! # Service Boundary
//!
//! Helpers that turn raw request input into typed values, and every outcome
//! into either a value or exactly one [`ErrorEnvelope`].
//!
//! ```text
//! raw body ── parse_json ──► Request DTO        (else MalformedInput)
//! path     ── parse_public_id ──► Uuid          (else BadParameter)
//! query    ── require_param ──► &str            (else missing BadParameter)
//! verb     ── ensure_method ──► ()              (else MethodNotAllowed)
//!
//! Result<T, Failure> ── respond ──► Result<T, ErrorEnvelope>
//! ```

use bank_core::{translate, CoreResult, ErrorEnvelope, Failure};
use serde::de::DeserializeOwned;
use tracing::debug;

pub use bank_core::validation::parse_public_id;

/// Parses a JSON request body.
///
/// Any syntax or shape error is reported as malformed input; field rules are
/// checked afterwards by the service.
pub fn parse_json<T: DeserializeOwned>(body: &str) -> CoreResult<T> {
    serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, "Request body rejected");
        Failure::from(e)
    })
}

/// Returns the parameter value, or a missing-parameter failure when it is
/// absent or blank.
pub fn require_param<'a>(name: &str, value: Option<&'a str>) -> CoreResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Failure::MissingParameter {
            name: name.to_string(),
        }),
    }
}

/// Failure for a verb the operation does not support.
pub fn reject_method(method: &str) -> Failure {
    Failure::MethodNotAllowed {
        method: method.to_ascii_uppercase(),
    }
}

/// Passes when `method` is one of `allowed` (case-insensitive).
pub fn ensure_method(method: &str, allowed: &[&str]) -> CoreResult<()> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(method)) {
        Ok(())
    } else {
        Err(reject_method(method))
    }
}

/// Funnels a service outcome through the translator.
pub fn respond<T>(result: CoreResult<T>) -> Result<T, ErrorEnvelope> {
    result.map_err(|failure| translate(&failure))
}
