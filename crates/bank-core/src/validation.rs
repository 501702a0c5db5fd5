//! # Validation Module
//!
//! Explicit input validation for account and transaction requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request parsing (bank-service)                               │
//! │  ├── Malformed JSON → MalformedInput                                   │
//! │  └── Bad path parameter → BadParameter                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Every rule runs, every violation is collected                     │
//! │  └── Non-empty Violations → ValidationFailure (400 + details)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE(document) → Conflict                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators never stop at the first problem: a request with a short name
//! and an empty document reports both fields at once.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::account::AccountUpdate;
use crate::error::ValidationError;
use crate::failure::Failure;
use crate::transaction::TransactionType;
use crate::{
    AMOUNT_FRACTION_DIGITS, AMOUNT_INTEGER_DIGITS, BALANCE_FRACTION_DIGITS,
    BALANCE_INTEGER_DIGITS, DESCRIPTION_MAX_LEN, DOCUMENT_MAX_LEN, DOCUMENT_MIN_LEN,
    NAME_MAX_LEN, NAME_MIN_LEN,
};

// =============================================================================
// Violations
// =============================================================================

/// Ordered list of field violations found in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("request contains {} validation error(s)", .0.len())]
pub struct Violations(Vec<ValidationError>);

impl Violations {
    pub fn new() -> Self {
        Violations(Vec::new())
    }

    pub fn push(&mut self, violation: ValidationError) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Violations in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<ValidationError>> for Violations {
    fn from(violations: Vec<ValidationError>) -> Self {
        Violations(violations)
    }
}

impl FromIterator<ValidationError> for Violations {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Violations(iter.into_iter().collect())
    }
}

/// Result type for validation operations.
pub type ValidationResult = Result<(), Violations>;

// =============================================================================
// Account Validators
// =============================================================================

/// Validates a create-account request.
///
/// ## Rules
/// - `name`: not blank, 3..=100 characters
/// - `document`: not blank, 8..=14 characters
///
/// ## Example
/// ```rust
/// use bank_core::validation::validate_create_account;
///
/// assert!(validate_create_account(Some("João Silva"), Some("12345678901")).is_ok());
///
/// let violations = validate_create_account(Some("J"), Some("")).unwrap_err();
/// assert_eq!(violations.len(), 3);
/// ```
pub fn validate_create_account(name: Option<&str>, document: Option<&str>) -> ValidationResult {
    let mut violations = Violations::new();

    check_not_blank(&mut violations, "name", name);
    check_size(&mut violations, "name", name, NAME_MIN_LEN, NAME_MAX_LEN);
    check_not_blank(&mut violations, "document", document);
    check_size(&mut violations, "document", document, DOCUMENT_MIN_LEN, DOCUMENT_MAX_LEN);

    violations.into_result()
}

/// Validates a partial account update. Absent fields are not checked.
///
/// ## Rules
/// - `name`: 3..=100 characters
/// - `document`: 8..=14 characters
/// - `balance`: at most 9 integer and 2 fraction digits, not negative
pub fn validate_update_account(update: &AccountUpdate) -> ValidationResult {
    let mut violations = Violations::new();

    check_size(&mut violations, "name", update.name.as_deref(), NAME_MIN_LEN, NAME_MAX_LEN);
    check_size(
        &mut violations,
        "document",
        update.document.as_deref(),
        DOCUMENT_MIN_LEN,
        DOCUMENT_MAX_LEN,
    );

    if let Some(balance) = update.balance {
        if !fits_digits(balance, BALANCE_INTEGER_DIGITS, BALANCE_FRACTION_DIGITS) {
            violations.push(ValidationError::Digits {
                field: "balance".to_string(),
                integer: BALANCE_INTEGER_DIGITS,
                fraction: BALANCE_FRACTION_DIGITS,
            });
        }
        if balance < Decimal::ZERO {
            violations.push(ValidationError::BelowMinimum {
                field: "balance".to_string(),
                min: Decimal::ZERO,
            });
        }
    }

    violations.into_result()
}

// =============================================================================
// Transaction Validators
// =============================================================================

/// Validates a create-transaction request.
///
/// ## Rules
/// - `fromAccountId`, `toAccountId`, `type`: required
/// - `amount`: required, 0.01..=999999.99, at most 6 integer / 2 fraction digits
/// - `description`: at most 500 characters
pub fn validate_create_transaction(
    from_account_id: Option<Uuid>,
    to_account_id: Option<Uuid>,
    amount: Option<Decimal>,
    kind: Option<TransactionType>,
    description: Option<&str>,
) -> ValidationResult {
    let mut violations = Violations::new();

    if from_account_id.is_none() {
        violations.push(ValidationError::NotNull {
            field: "fromAccountId".to_string(),
        });
    }
    if to_account_id.is_none() {
        violations.push(ValidationError::NotNull {
            field: "toAccountId".to_string(),
        });
    }

    match amount {
        None => violations.push(ValidationError::NotNull {
            field: "amount".to_string(),
        }),
        Some(amount) => {
            if amount < Decimal::new(1, 2) {
                violations.push(ValidationError::AmountNotPositive {
                    field: "amount".to_string(),
                });
            }
            if amount > Decimal::new(99_999_999, 2) {
                violations.push(ValidationError::AmountAboveLimit {
                    field: "amount".to_string(),
                });
            }
            if !fits_digits(amount, AMOUNT_INTEGER_DIGITS, AMOUNT_FRACTION_DIGITS) {
                violations.push(ValidationError::AmountPrecision {
                    field: "amount".to_string(),
                    integer: AMOUNT_INTEGER_DIGITS,
                    fraction: AMOUNT_FRACTION_DIGITS,
                });
            }
        }
    }

    if kind.is_none() {
        violations.push(ValidationError::NotNull {
            field: "type".to_string(),
        });
    }

    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            violations.push(ValidationError::DescriptionTooLong {
                field: "description".to_string(),
                max: DESCRIPTION_MAX_LEN,
            });
        }
    }

    violations.into_result()
}

// =============================================================================
// Parameter Parsing
// =============================================================================

/// Parses a public identifier taken from a request path or query.
///
/// ## Example
/// ```rust
/// use bank_core::validation::parse_public_id;
///
/// assert!(parse_public_id("publicId", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(parse_public_id("publicId", "not-a-uuid").is_err());
/// ```
pub fn parse_public_id(param: &str, raw: &str) -> Result<Uuid, Failure> {
    Uuid::parse_str(raw.trim()).map_err(|_| Failure::BadParameter {
        name: param.to_string(),
        value: raw.to_string(),
        expected: "UUID".to_string(),
    })
}

// =============================================================================
// Rule Helpers
// =============================================================================

fn check_not_blank(violations: &mut Violations, field: &str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        violations.push(ValidationError::NotBlank {
            field: field.to_string(),
        });
    }
}

// A missing value passes; pair with check_not_blank when it is required.
fn check_size(violations: &mut Violations, field: &str, value: Option<&str>, min: usize, max: usize) {
    if let Some(value) = value {
        let len = value.chars().count();
        if len < min || len > max {
            violations.push(ValidationError::Size {
                field: field.to_string(),
                min,
                max,
            });
        }
    }
}

/// Digit counts ignore sign and trailing fractional zeros, so `150.00` has
/// 3 integer and 0 fraction digits.
fn fits_digits(value: Decimal, integer: u32, fraction: u32) -> bool {
    let normalized = value.abs().normalize();
    let integer_part = normalized.trunc();
    let integer_len = if integer_part.is_zero() {
        0
    } else {
        integer_part.mantissa().to_string().len() as u32
    };
    integer_len <= integer && normalized.scale() <= fraction
}

// =============================================================================
// Unit Tests
// =============================================================================
