//! # Transaction Record
//!
//! The record persisted by the transaction service.
//!
//! A transaction is only recorded here: nothing in this workspace moves money
//! between the two accounts it names. Every record starts PENDING.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Transaction Type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Transfer,
    Deposit,
    Withdrawal,
}

// =============================================================================
// Transaction Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Recorded, not yet settled.
    Pending,
    Completed,
    Failed,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Pending
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A requested movement of funds between two accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Public identifier (UUID v4), assigned in [`Transaction::record`].
    pub public_id: Uuid,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub description: Option<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Records a new PENDING transaction.
    ///
    /// Run [`crate::validation::validate_create_transaction`] first.
    pub fn record(
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Decimal,
        kind: TransactionType,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Transaction {
            public_id: Uuid::new_v4(),
            from_account_id,
            to_account_id,
            amount,
            kind,
            description,
            status: TransactionStatus::Pending,
            created_at: now,
            updated_at: now,
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
    fn test_record_starts_pending() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let tx = Transaction::record(
            from,
            to,
            Decimal::new(2500, 2),
            TransactionType::Transfer,
            Some("Dinner".to_string()),
        );

        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.from_account_id, from);
        assert_eq!(tx.to_account_id, to);
        assert_eq!(tx.amount.to_string(), "25.00");
        assert_eq!(tx.created_at, tx.updated_at);
    }

    #[test]
    fn test_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Withdrawal).unwrap(),
            "\"WITHDRAWAL\""
        );
        let parsed: TransactionType = serde_json::from_str("\"DEPOSIT\"").unwrap();
        assert_eq!(parsed, TransactionType::Deposit);
    }
}
