//! # bank-core: Pure Business Logic for the Bank Services
//!
//! This crate is the shared heart of the account and transaction services.
//! It contains the account lifecycle rules and the error classification
//! layer, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bank Services Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                bank-service (orchestration)                     │   │
//! │  │   parse ──► validate ──► load ──► mutate ──► save ──► respond  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ bank-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  account  │  │validation │  │  failure  │  │ envelope  │  │   │
//! │  │   │  Account  │  │Violations │  │ ErrorKind │  │ translate │  │   │
//! │  │   │  Status   │  │  rules    │  │  Failure  │  │ Envelope  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bank-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`account`] - Account entity and its ACTIVE/INACTIVE state machine
//! - [`transaction`] - Transaction record persisted by the transaction service
//! - [`error`] - Typed conditions raised by the domain (conflicts, violations)
//! - [`validation`] - Explicit input validation producing field violations
//! - [`failure`] - The closed error taxonomy every failure is classified into
//! - [`envelope`] - The uniform error envelope and the total translator
//!
//! ## Example Usage
//!
//! ```rust
//! use bank_core::{translate, Account, Failure};
//!
//! let mut account = Account::open("João Silva", "12345678901");
//! account.deactivate().unwrap();
//!
//! // Deactivating twice is a conflict, reported as a 409 envelope
//! let failure: Failure = account.deactivate().unwrap_err().into();
//! let envelope = translate(&failure);
//! assert_eq!(envelope.status(), 409);
//! assert_eq!(envelope.message(), "Account is already inactive");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod account;
pub mod envelope;
pub mod error;
pub mod failure;
pub mod transaction;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use account::{Account, AccountSnapshot, AccountStatus, AccountUpdate};
pub use envelope::{translate, translate_at, ErrorEnvelope, FieldDetails};
pub use error::{AccountConflict, ValidationError};
pub use failure::{Conflict, CoreResult, ErrorKind, Failure};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use validation::Violations;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Holder name length bounds (inclusive).
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;

/// Holder document length bounds (inclusive). Fits CPF and CNPJ, formatted
/// or bare.
pub const DOCUMENT_MIN_LEN: usize = 8;
pub const DOCUMENT_MAX_LEN: usize = 14;

/// Balance precision accepted on account updates.
pub const BALANCE_INTEGER_DIGITS: u32 = 9;
pub const BALANCE_FRACTION_DIGITS: u32 = 2;

/// Transaction amount precision.
pub const AMOUNT_INTEGER_DIGITS: u32 = 6;
pub const AMOUNT_FRACTION_DIGITS: u32 = 2;

/// Maximum transaction description length.
pub const DESCRIPTION_MAX_LEN: usize = 500;
