//! # Transaction Repository
//!
//! Persists transaction records. Account ids are stored as plain UUID text
//! and are not checked against the accounts table.

use std::str::FromStr;

use bank_core::{Transaction, TransactionStatus, TransactionType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    public_id: String,
    from_account_id: String,
    to_account_id: String,
    amount: String,
    kind: TransactionType,
    description: Option<String>,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_uuid(column: &str, raw: &str) -> DbResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| DbError::corrupt(column, e))
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DbError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            public_id: parse_uuid("public_id", &row.public_id)?,
            from_account_id: parse_uuid("from_account_id", &row.from_account_id)?,
            to_account_id: parse_uuid("to_account_id", &row.to_account_id)?,
            amount: Decimal::from_str(&row.amount).map_err(|e| DbError::corrupt("amount", e))?,
            kind: row.kind,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Inserts a transaction record.
    ///
    /// ## Returns
    /// * `Ok(Transaction)` - The stored record
    /// * `Err(DbError::UniqueViolation)` - The public id is already taken
    pub async fn insert(&self, tx: &Transaction) -> DbResult<Transaction> {
        debug!(
            public_id = %tx.public_id,
            from = %tx.from_account_id,
            to = %tx.to_account_id,
            kind = ?tx.kind,
            "Inserting transaction"
        );

        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (
                public_id, from_account_id, to_account_id, amount, type,
                description, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING
                public_id, from_account_id, to_account_id, amount, type AS kind,
                description, status, created_at, updated_at
            "#,
        )
        .bind(tx.public_id.to_string())
        .bind(tx.from_account_id.to_string())
        .bind(tx.to_account_id.to_string())
        .bind(tx.amount.to_string())
        .bind(tx.kind)
        .bind(tx.description.as_deref())
        .bind(tx.status)
        .bind(tx.created_at)
        .bind(tx.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Gets a transaction by its public id.
    pub async fn get_by_public_id(&self, public_id: Uuid) -> DbResult<Option<Transaction>> {
        debug!(public_id = %public_id, "Loading transaction");

        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT
                public_id, from_account_id, to_account_id, amount, type AS kind,
                description, status, created_at, updated_at
            FROM transactions
            WHERE public_id = ?1
            "#,
        )
        .bind(public_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Transaction::try_from).transpose()
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
