//! # Error Types
//!
//! Typed conditions raised by bank-core itself.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bank-core conditions (this file)                                       │
//! │  ├── AccountConflict  - Illegal lifecycle transition                    │
//! │  └── ValidationError  - One field-level input violation                 │
//! │                                                                         │
//! │  bank-core taxonomy (failure.rs)                                        │
//! │  └── Failure          - Every failure, classified into an ErrorKind     │
//! │                                                                         │
//! │  bank-db errors (separate crate)                                        │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  Flow: AccountConflict / ValidationError / DbError                      │
//! │            → Failure → translate() → ErrorEnvelope → client             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Display text is exactly what the client reads
//! 3. Errors are enum variants, never String

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Account Conflict
// =============================================================================

/// A lifecycle transition the account's current state does not allow.
///
/// The account is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AccountConflict {
    /// `deactivate()` on an account that is already INACTIVE.
    ///
    /// Takes precedence over [`AccountConflict::NonZeroBalance`].
    #[error("Account is already inactive")]
    AlreadyInactive,

    /// `deactivate()` on an ACTIVE account whose balance is not zero.
    #[error("Cannot delete account with non-zero balance.")]
    NonZeroBalance,

    /// `reactivate()` on an account that is already ACTIVE.
    #[error("Account is already active")]
    AlreadyActive,
}

impl AccountConflict {
    /// Stable machine-readable reason code.
    pub const fn code(&self) -> &'static str {
        match self {
            AccountConflict::AlreadyInactive => "already-inactive",
            AccountConflict::NonZeroBalance => "nonzero-balance",
            AccountConflict::AlreadyActive => "already-active",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field-level input violation.
///
/// Display text is the per-field message rendered into the envelope's
/// `details`; the field name is carried separately via [`ValidationError::field`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required string is missing, empty or whitespace only.
    #[error("must not be blank")]
    NotBlank { field: String },

    /// A required value is missing.
    #[error("must not be null")]
    NotNull { field: String },

    /// String length (in characters) is outside the allowed range.
    #[error("size must be between {min} and {max}")]
    Size {
        field: String,
        min: usize,
        max: usize,
    },

    /// Decimal has too many integer or fraction digits.
    #[error("numeric value out of bounds (<{integer} digits>.<{fraction} digits> expected)")]
    Digits {
        field: String,
        integer: u32,
        fraction: u32,
    },

    /// Decimal is below an inclusive minimum.
    #[error("must be greater than or equal to {min}")]
    BelowMinimum { field: String, min: Decimal },

    /// Transaction amount is zero, negative, or below one cent.
    #[error("Amount must be greater than zero")]
    AmountNotPositive { field: String },

    /// Transaction amount exceeds the per-transaction ceiling.
    #[error("Amount cannot exceed 999,999.99")]
    AmountAboveLimit { field: String },

    /// Transaction amount has too many digits.
    #[error("Amount must have at most {integer} integer digits and {fraction} decimal places")]
    AmountPrecision {
        field: String,
        integer: u32,
        fraction: u32,
    },

    /// Free-text description is too long.
    #[error("Description cannot exceed {max} characters")]
    DescriptionTooLong { field: String, max: usize },
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::NotBlank { field }
            | ValidationError::NotNull { field }
            | ValidationError::Size { field, .. }
            | ValidationError::Digits { field, .. }
            | ValidationError::BelowMinimum { field, .. }
            | ValidationError::AmountNotPositive { field }
            | ValidationError::AmountAboveLimit { field }
            | ValidationError::AmountPrecision { field, .. }
            | ValidationError::DescriptionTooLong { field, .. } => field,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_messages() {
        assert_eq!(
            AccountConflict::AlreadyInactive.to_string(),
            "Account is already inactive"
        );
        assert_eq!(
            AccountConflict::NonZeroBalance.to_string(),
            "Cannot delete account with non-zero balance."
        );
        assert_eq!(
            AccountConflict::AlreadyActive.to_string(),
            "Account is already active"
        );
    }

    #[test]
    fn test_conflict_codes() {
        assert_eq!(AccountConflict::AlreadyInactive.code(), "already-inactive");
        assert_eq!(AccountConflict::NonZeroBalance.code(), "nonzero-balance");
        assert_eq!(AccountConflict::AlreadyActive.code(), "already-active");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Size {
            field: "name".to_string(),
            min: 3,
            max: 100,
        };
        assert_eq!(err.to_string(), "size must be between 3 and 100");
        assert_eq!(err.field(), "name");

        let err = ValidationError::Digits {
            field: "balance".to_string(),
            integer: 9,
            fraction: 2,
        };
        assert_eq!(
            err.to_string(),
            "numeric value out of bounds (<9 digits>.<2 digits> expected)"
        );

        let err = ValidationError::AmountPrecision {
            field: "amount".to_string(),
            integer: 6,
            fraction: 2,
        };
        assert_eq!(
            err.to_string(),
            "Amount must have at most 6 integer digits and 2 decimal places"
        );
    }
}
