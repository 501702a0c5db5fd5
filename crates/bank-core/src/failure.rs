//! # Failure Taxonomy
//!
//! Every failure either service can produce, classified into a closed set of
//! [`ErrorKind`]s.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Failure variant          ErrorKind            Status                   │
//! │  ──────────────────────   ──────────────────   ──────                   │
//! │  Validation(Violations)   ValidationFailure    400                      │
//! │  MalformedInput           MalformedInput       400                      │
//! │  BadParameter             BadParameter         400                      │
//! │  MissingParameter         BadParameter         400                      │
//! │  NotFound                 NotFound             404                      │
//! │  Conflict(Conflict)       Conflict             409                      │
//! │  MethodNotAllowed         MethodNotAllowed     405                      │
//! │  Internal                 Internal             500                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Anything that is not one of the known conditions enters through
//! [`Failure::unclassified`] and lands on the Internal row.

use std::fmt;

use thiserror::Error;

use crate::error::AccountConflict;
use crate::validation::Violations;

// =============================================================================
// Error Kind
// =============================================================================

/// The closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ValidationFailure,
    MalformedInput,
    BadParameter,
    NotFound,
    Conflict,
    MethodNotAllowed,
    Internal,
}

impl ErrorKind {
    /// Every kind, in table order.
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::ValidationFailure,
        ErrorKind::MalformedInput,
        ErrorKind::BadParameter,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::MethodNotAllowed,
        ErrorKind::Internal,
    ];

    /// Canonical HTTP status for this kind.
    pub const fn status(&self) -> u16 {
        match self {
            ErrorKind::ValidationFailure
            | ErrorKind::MalformedInput
            | ErrorKind::BadParameter => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
        }
    }

    pub const fn is_client_error(&self) -> bool {
        let status = self.status();
        status >= 400 && status < 500
    }
}

// =============================================================================
// Conflict
// =============================================================================

/// Well-formed request that the resource's current state refuses.
///
/// Display text is the reason shown to the client; it is never generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Conflict {
    /// Illegal lifecycle transition.
    #[error(transparent)]
    Transition(#[from] AccountConflict),

    /// A unique constraint (e.g. account document) was violated.
    #[error("Resource already exists with provided data")]
    Duplicate,

    /// A foreign key constraint was violated.
    #[error("Operation violated referential integrity")]
    ReferentialIntegrity,

    /// Any other integrity constraint was violated.
    #[error("Operation violated data integrity constraints")]
    Integrity,

    /// The record changed between load and save.
    #[error("Account was modified concurrently")]
    StaleWrite,
}

impl Conflict {
    /// Stable machine-readable reason code.
    pub const fn code(&self) -> &'static str {
        match self {
            Conflict::Transition(conflict) => conflict.code(),
            Conflict::Duplicate => "duplicate",
            Conflict::ReferentialIntegrity => "referential-integrity",
            Conflict::Integrity => "integrity",
            Conflict::StaleWrite => "stale-write",
        }
    }
}

// =============================================================================
// Failure
// =============================================================================

/// Any failure raised by parsing, validation, business logic or storage.
///
/// The `Display` text is for logs. What clients see is produced by
/// [`crate::envelope::translate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// Field-level validation failed.
    #[error(transparent)]
    Validation(#[from] Violations),

    /// Request body could not be parsed.
    #[error("malformed request body: {0}")]
    MalformedInput(String),

    /// A path/query parameter does not have the expected shape.
    #[error("invalid value '{value}' for parameter '{name}', expected {expected}")]
    BadParameter {
        name: String,
        value: String,
        expected: String,
    },

    /// A required path/query parameter was not supplied.
    #[error("required parameter '{name}' is missing")]
    MissingParameter { name: String },

    /// Lookup found nothing. `key` is the identifier looked up, when known.
    #[error("not found: {}", .key.as_deref().unwrap_or("<unknown>"))]
    NotFound { key: Option<String> },

    /// Request conflicts with current resource state.
    #[error(transparent)]
    Conflict(#[from] Conflict),

    /// Operation does not support this verb.
    #[error("method {method} not allowed")]
    MethodNotAllowed { method: String },

    /// Unexpected failure. `detail` is logged, never rendered.
    #[error("internal failure: {detail}")]
    Internal { detail: String },
}

impl Failure {
    /// Classifies this failure.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Failure::Validation(_) => ErrorKind::ValidationFailure,
            Failure::MalformedInput(_) => ErrorKind::MalformedInput,
            Failure::BadParameter { .. } | Failure::MissingParameter { .. } => {
                ErrorKind::BadParameter
            }
            Failure::NotFound { .. } => ErrorKind::NotFound,
            Failure::Conflict(_) => ErrorKind::Conflict,
            Failure::MethodNotAllowed { .. } => ErrorKind::MethodNotAllowed,
            Failure::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Not found, with the key that was looked up.
    pub fn not_found(key: impl fmt::Display) -> Self {
        Failure::NotFound {
            key: Some(key.to_string()),
        }
    }

    /// Wraps any error no other variant describes.
    pub fn unclassified(err: impl fmt::Display) -> Self {
        Failure::Internal {
            detail: err.to_string(),
        }
    }
}

impl From<AccountConflict> for Failure {
    fn from(conflict: AccountConflict) -> Self {
        Failure::Conflict(Conflict::Transition(conflict))
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Failure::MalformedInput(err.to_string())
    }
}

/// Convenience type alias for Results with Failure.
pub type CoreResult<T> = Result<T, Failure>;

// =============================================================================
// Unit Tests
// =============================================================================
