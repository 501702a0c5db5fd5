//! # Account
//!
//! The account entity and its lifecycle state machine.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Account State Machine                             │
//! │                                                                         │
//! │   Account::open()                                                       │
//! │        │  balance = 0                                                   │
//! │        ▼                                                                │
//! │   ┌──────────┐     deactivate()      ┌────────────┐                    │
//! │   │  ACTIVE  │ ────────────────────► │  INACTIVE  │                    │
//! │   │          │   only if balance=0   │            │                    │
//! │   │          │ ◄──────────────────── │            │                    │
//! │   └──────────┘     reactivate()      └────────────┘                    │
//! │                                                                         │
//! │   deactivate() on INACTIVE → AlreadyInactive (checked first)           │
//! │   deactivate() with balance ≠ 0 → NonZeroBalance                       │
//! │   reactivate() on ACTIVE   → AlreadyActive                              │
//! │                                                                         │
//! │   apply_update() is allowed in both states and never fails             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! - Internal sequential id: owned by the storage layer, never on this type
//! - `public_id`: UUID v4 assigned once in [`Account::open`], immutable

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AccountConflict;

// =============================================================================
// Account Status
// =============================================================================

/// Whether an account may currently be used.
///
/// INACTIVE is a soft delete: reversible, never a physical removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    /// Storage/wire representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
        }
    }
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Active
    }
}

// =============================================================================
// Partial Update
// =============================================================================

/// Fields to replace on an account. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub document: Option<String>,
    pub balance: Option<Decimal>,
}

// =============================================================================
// Snapshot (storage rehydration)
// =============================================================================

/// Every stored attribute of an account, used to rebuild an [`Account`]
/// loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub public_id: Uuid,
    pub name: String,
    pub document: String,
    pub balance: Decimal,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter, maintained by storage.
    pub version: i64,
}

// =============================================================================
// Account
// =============================================================================

/// A bank account held by one person or company.
///
/// Fields are private so status and balance can only change through the
/// operations below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    public_id: Uuid,
    name: String,
    document: String,
    balance: Decimal,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl Account {
    /// Opens a new account: fresh public id, zero balance, ACTIVE.
    ///
    /// Does not validate `name`/`document`; run
    /// [`crate::validation::validate_create_account`] first.
    pub fn open(name: impl Into<String>, document: impl Into<String>) -> Self {
        let now = Utc::now();
        Account {
            public_id: Uuid::new_v4(),
            name: name.into(),
            document: document.into(),
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Rebuilds an account exactly as it was stored.
    pub fn restore(snapshot: AccountSnapshot) -> Self {
        Account {
            public_id: snapshot.public_id,
            name: snapshot.name,
            document: snapshot.document,
            balance: snapshot.balance,
            status: snapshot.status,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            version: snapshot.version,
        }
    }

    #[inline]
    pub fn public_id(&self) -> Uuid {
        self.public_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[inline]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    #[inline]
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Version this value was loaded at (0 for a never-saved account).
    #[inline]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Replaces only the supplied fields and refreshes `updated_at`.
    ///
    /// Values are taken as-is: a negative balance supplied here is stored,
    /// not clamped. Rejecting it is the validation layer's job.
    pub fn apply_update(&mut self, update: AccountUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(document) = update.document {
            self.document = document;
        }
        if let Some(balance) = update.balance {
            self.balance = balance;
        }
        self.touch();
    }

    /// ACTIVE → INACTIVE.
    ///
    /// ## Errors
    /// - [`AccountConflict::AlreadyInactive`] if already INACTIVE, whatever
    ///   the balance
    /// - [`AccountConflict::NonZeroBalance`] if the balance is not exactly zero
    pub fn deactivate(&mut self) -> Result<(), AccountConflict> {
        if self.status == AccountStatus::Inactive {
            return Err(AccountConflict::AlreadyInactive);
        }

        if !self.balance.is_zero() {
            return Err(AccountConflict::NonZeroBalance);
        }

        self.status = AccountStatus::Inactive;
        self.touch();
        Ok(())
    }

    /// INACTIVE → ACTIVE. No balance precondition.
    ///
    /// ## Errors
    /// - [`AccountConflict::AlreadyActive`] if already ACTIVE
    pub fn reactivate(&mut self) -> Result<(), AccountConflict> {
        if self.status == AccountStatus::Active {
            return Err(AccountConflict::AlreadyActive);
        }

        self.status = AccountStatus::Active;
        self.touch();
        Ok(())
    }

    // Never moves backwards, even if the wall clock does.
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
