//! # Error Envelope
//!
//! The single wire shape every failure is reported in, and the translator
//! that produces it.
//!
//! ## Wire Contract
//! ```json
//! {
//!   "timestamp": "18/10/2026 14:03:22",
//!   "status": 400,
//!   "message": "Request contains validation errors",
//!   "details": {
//!     "name": ["size must be between 3 and 100"],
//!     "document": ["must not be blank", "size must be between 8 and 14"]
//!   }
//! }
//! ```
//! Field order is fixed. `details` is omitted unless there are field
//! violations, and its keys keep the order the violations were found in.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, error};

use crate::failure::{ErrorKind, Failure};
use crate::validation::Violations;

/// `dd/MM/yyyy HH:mm:ss`, UTC.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

pub const VALIDATION_MESSAGE: &str = "Request contains validation errors";
pub const MALFORMED_INPUT_MESSAGE: &str = "Invalid or malformed JSON";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
pub const INTERNAL_MESSAGE: &str = "Internal server error. Please try again later.";

// =============================================================================
// Field Details
// =============================================================================

/// Field name → violation messages, in encounter order.
///
/// Keys are only created by [`FieldDetails::push`], so a key never maps to an
/// empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDetails(Vec<(String, Vec<String>)>);

impl FieldDetails {
    pub fn new() -> Self {
        FieldDetails(Vec::new())
    }

    /// Appends `message` under `field`, creating the key on first use.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.0.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.0.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl From<&Violations> for FieldDetails {
    fn from(violations: &Violations) -> Self {
        let mut details = FieldDetails::new();
        for violation in violations.iter() {
            details.push(violation.field(), violation.to_string());
        }
        details
    }
}

impl Serialize for FieldDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, messages) in &self.0 {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

// =============================================================================
// Error Envelope
// =============================================================================

/// Uniform error body. Built once by [`translate`], never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    timestamp: String,
    status: u16,
    message: String,
    #[serde(skip_serializing_if = "FieldDetails::is_empty")]
    details: FieldDetails,
}

impl ErrorEnvelope {
    fn new(at: DateTime<Utc>, kind: ErrorKind, message: String, details: FieldDetails) -> Self {
        ErrorEnvelope {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            status: kind.status(),
            message,
            details,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &FieldDetails {
        &self.details
    }

    /// Serialized body.
    pub fn to_json(&self) -> String {
        // Only strings, integers and string lists: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{{\"timestamp\":\"{}\",\"status\":{},\"message\":\"{}\"}}",
                self.timestamp, self.status, INTERNAL_MESSAGE
            )
        })
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl std::error::Error for ErrorEnvelope {}

// =============================================================================
// Translator
// =============================================================================

/// Converts any failure into its envelope, stamped with the current time.
///
/// Total: every [`Failure`] variant has exactly one row, and this never fails.
pub fn translate(failure: &Failure) -> ErrorEnvelope {
    translate_at(failure, Utc::now())
}

/// [`translate`] with an explicit timestamp.
pub fn translate_at(failure: &Failure, at: DateTime<Utc>) -> ErrorEnvelope {
    let kind = failure.kind();
    let mut details = FieldDetails::new();

    let message = match failure {
        Failure::Validation(violations) => {
            details = FieldDetails::from(violations);
            VALIDATION_MESSAGE.to_string()
        }
        Failure::MalformedInput(_) => MALFORMED_INPUT_MESSAGE.to_string(),
        Failure::BadParameter {
            name,
            value,
            expected,
        } => format!("Invalid value '{value}' for parameter '{name}'. Expected type: {expected}"),
        Failure::MissingParameter { name } => format!("Required parameter '{name}' is missing"),
        Failure::NotFound { key: Some(key) } => format!("Entity not found with id {key}"),
        Failure::NotFound { key: None } => NOT_FOUND_MESSAGE.to_string(),
        Failure::Conflict(conflict) => conflict.to_string(),
        Failure::MethodNotAllowed { method } => {
            format!("HTTP method '{method}' not supported for this endpoint")
        }
        Failure::Internal { detail } => {
            error!(detail = %detail, "Unhandled failure");
            INTERNAL_MESSAGE.to_string()
        }
    };

    if kind != ErrorKind::Internal {
        debug!(status = kind.status(), kind = ?kind, %failure, "Failure translated");
    }

    ErrorEnvelope::new(at, kind, message, details)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AccountConflict, ValidationError};
    use crate::failure::Conflict;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 21, 10, 10).unwrap()
    }

    fn sample(kind: ErrorKind) -> Failure {
        match kind {
            ErrorKind::ValidationFailure => Failure::Validation(
                vec![ValidationError::NotBlank {
                    field: "name".to_string(),
                }]
                .into(),
            ),
            ErrorKind::MalformedInput => Failure::MalformedInput("EOF".to_string()),
            ErrorKind::BadParameter => Failure::BadParameter {
                name: "publicId".to_string(),
                value: "abc".to_string(),
                expected: "UUID".to_string(),
            },
            ErrorKind::NotFound => Failure::NotFound { key: None },
            ErrorKind::Conflict => AccountConflict::AlreadyActive.into(),
            ErrorKind::MethodNotAllowed => Failure::MethodNotAllowed {
                method: "PATCH".to_string(),
            },
            ErrorKind::Internal => Failure::unclassified("disk on fire"),
        }
    }

    #[test]
    fn test_every_kind_has_status_and_message() {
        for kind in ErrorKind::ALL {
            let envelope = translate(&sample(kind));
            assert_eq!(envelope.status(), kind.status());
            assert!(!envelope.message().is_empty());
        }
    }

    #[test]
    fn test_field_aggregation_keeps_encounter_order() {
        let violations: Violations = vec![
            ValidationError::Size {
                field: "name".to_string(),
                min: 3,
                max: 100,
            },
            ValidationError::NotBlank {
                field: "name".to_string(),
            },
            ValidationError::Size {
                field: "document".to_string(),
                min: 8,
                max: 14,
            },
        ]
        .into();

        let envelope = translate(&Failure::Validation(violations));
        let details = envelope.details();

        assert_eq!(details.len(), 2);
        assert_eq!(details.fields().collect::<Vec<_>>(), vec!["name", "document"]);
        assert_eq!(
            details.get("name").unwrap(),
            &["size must be between 3 and 100", "must not be blank"]
        );
        assert_eq!(
            details.get("document").unwrap(),
            &["size must be between 8 and 14"]
        );
    }

    #[test]
    fn test_field_details_push_groups_by_key() {
        let mut details = FieldDetails::new();
        details.push("name", "too short");
        details.push("name", "required");
        details.push("document", "too short");

        assert_eq!(details.len(), 2);
        assert_eq!(details.get("name").unwrap(), &["too short", "required"]);
        assert_eq!(details.get("document").unwrap(), &["too short"]);
        assert!(details.get("balance").is_none());
    }

    #[test]
    fn test_wire_format_without_details() {
        let envelope = translate_at(&AccountConflict::NonZeroBalance.into(), fixed_time());

        assert_eq!(
            envelope.to_json(),
            r#"{"timestamp":"01/01/2024 21:10:10","status":409,"message":"Cannot delete account with non-zero balance."}"#
        );
    }

    #[test]
    fn test_wire_format_with_details() {
        let violations: Violations = vec![
            ValidationError::Size {
                field: "name".to_string(),
                min: 3,
                max: 100,
            },
            ValidationError::NotBlank {
                field: "document".to_string(),
            },
        ]
        .into();

        let envelope = translate_at(&Failure::Validation(violations), fixed_time());

        assert_eq!(
            envelope.to_json(),
            concat!(
                r#"{"timestamp":"01/01/2024 21:10:10","status":400,"#,
                r#""message":"Request contains validation errors","#,
                r#""details":{"name":["size must be between 3 and 100"],"document":["must not be blank"]}}"#
            )
        );
    }

    #[test]
    fn test_not_found_message_uses_key_when_known() {
        let with_key = translate(&Failure::not_found("550e8400-e29b-41d4-a716-446655440000"));
        assert_eq!(
            with_key.message(),
            "Entity not found with id 550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(with_key.status(), 404);

        let without_key = translate(&Failure::NotFound { key: None });
        assert_eq!(without_key.message(), "Resource not found");
    }

    #[test]
    fn test_conflict_message_is_specific_reason() {
        for (reason, message) in [
            (Conflict::Duplicate, "Resource already exists with provided data"),
            (
                Conflict::ReferentialIntegrity,
                "Operation violated referential integrity",
            ),
            (
                Conflict::Integrity,
                "Operation violated data integrity constraints",
            ),
            (Conflict::StaleWrite, "Account was modified concurrently"),
        ] {
            let envelope = translate(&Failure::Conflict(reason));
            assert_eq!(envelope.status(), 409);
            assert_eq!(envelope.message(), message);
            assert!(envelope.details().is_empty());
        }
    }

    #[test]
    fn test_internal_never_leaks_detail() {
        let envelope = translate(&Failure::unclassified("password=hunter2 at db.rs:42"));

        assert_eq!(envelope.status(), 500);
        assert_eq!(envelope.message(), INTERNAL_MESSAGE);
        assert!(!envelope.to_json().contains("hunter2"));
        assert!(envelope.details().is_empty());
    }

    #[test]
    fn test_bad_parameter_message_names_parameter_and_shape() {
        let envelope = translate(&sample(ErrorKind::BadParameter));
        assert_eq!(
            envelope.message(),
            "Invalid value 'abc' for parameter 'publicId'. Expected type: UUID"
        );

        let missing = translate(&Failure::MissingParameter {
            name: "accountId".to_string(),
        });
        assert_eq!(missing.message(), "Required parameter 'accountId' is missing");
        assert_eq!(missing.status(), 400);
    }

    #[test]
    fn test_method_not_allowed_names_verb() {
        let envelope = translate(&sample(ErrorKind::MethodNotAllowed));
        assert_eq!(envelope.status(), 405);
        assert_eq!(
            envelope.message(),
            "HTTP method 'PATCH' not supported for this endpoint"
        );
    }

    #[test]
    fn test_malformed_input_has_fixed_message() {
        let envelope = translate(&sample(ErrorKind::MalformedInput));
        assert_eq!(envelope.message(), "Invalid or malformed JSON");
        assert!(envelope.details().is_empty());
    }

    #[test]
    fn test_display() {
        let envelope = translate(&sample(ErrorKind::NotFound));
        assert_eq!(envelope.to_string(), "[404] Resource not found");
    }
}
