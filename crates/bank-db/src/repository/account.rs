//! # Account Repository
//!
//! Database operations for accounts.
//!
//! ## Optimistic Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Read-Modify-Write Safety                             │
//! │                                                                         │
//! │  Request A: load (version 4) ── deactivate ── UPDATE … version = 4 ✓  │
//! │  Request B: load (version 4) ── reactivate ── UPDATE … version = 4 ✗  │
//! │                                                                         │
//! │  The second UPDATE matches no row: the version moved to 5.             │
//! │  → DbError::StaleWrite, never a silent overwrite                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use bank_core::{Account, AccountSnapshot, AccountStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

const ENTITY: &str = "Account";

/// Raw `accounts` row. `id` is never selected: it stays inside storage.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    public_id: String,
    name: String,
    document: String,
    balance: String,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl TryFrom<AccountRow> for Account {
    type Error = DbError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let public_id =
            Uuid::parse_str(&row.public_id).map_err(|e| DbError::corrupt("public_id", e))?;
        let balance = Decimal::from_str(&row.balance).map_err(|e| DbError::corrupt("balance", e))?;

        Ok(Account::restore(AccountSnapshot {
            public_id,
            name: row.name,
            document: row.document,
            balance,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            version: row.version,
        }))
    }
}

/// Repository for account database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.accounts();
///
/// let saved = repo.insert(&Account::open("João Silva", "12345678901")).await?;
/// let found = repo.get_by_public_id(saved.public_id()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Inserts a newly opened account.
    ///
    /// ## Returns
    /// * `Ok(Account)` - The stored account, as read back
    /// * `Err(DbError::UniqueViolation)` - Document already registered
    pub async fn insert(&self, account: &Account) -> DbResult<Account> {
        debug!(public_id = %account.public_id(), "Inserting account");

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (
                public_id, name, document, balance, status,
                created_at, updated_at, version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING
                public_id, name, document, balance, status,
                created_at, updated_at, version
            "#,
        )
        .bind(account.public_id().to_string())
        .bind(account.name())
        .bind(account.document())
        .bind(account.balance().to_string())
        .bind(account.status())
        .bind(account.created_at())
        .bind(account.updated_at())
        .bind(account.version())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Lists every account, ACTIVE and INACTIVE, in creation order.
    pub async fn find_all(&self) -> DbResult<Vec<Account>> {
        debug!("Listing accounts");

        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                public_id, name, document, balance, status,
                created_at, updated_at, version
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    /// Gets an account by its public id.
    ///
    /// ## Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that id
    pub async fn get_by_public_id(&self, public_id: Uuid) -> DbResult<Option<Account>> {
        debug!(public_id = %public_id, "Loading account");

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                public_id, name, document, balance, status,
                created_at, updated_at, version
            FROM accounts
            WHERE public_id = ?1
            "#,
        )
        .bind(public_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    /// Saves a loaded account, provided nobody saved it since it was read.
    ///
    /// The stored version must still equal `account.version()`; it is bumped
    /// by one on success.
    ///
    /// ## Returns
    /// * `Ok(Account)` - The account as stored, carrying the new version
    /// * `Err(DbError::StaleWrite)` - The row changed after it was loaded
    /// * `Err(DbError::NotFound)` - The row no longer exists
    /// * `Err(DbError::UniqueViolation)` - New document belongs to another account
    pub async fn update(&self, account: &Account) -> DbResult<Account> {
        let public_id = account.public_id().to_string();
        debug!(
            public_id = %public_id,
            version = account.version(),
            status = account.status().as_str(),
            "Updating account"
        );

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts SET
                name = ?3,
                document = ?4,
                balance = ?5,
                status = ?6,
                updated_at = ?7,
                version = version + 1
            WHERE public_id = ?1 AND version = ?2
            RETURNING
                public_id, name, document, balance, status,
                created_at, updated_at, version
            "#,
        )
        .bind(&public_id)
        .bind(account.version())
        .bind(account.name())
        .bind(account.document())
        .bind(account.balance().to_string())
        .bind(account.status())
        .bind(account.updated_at())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None if self.exists(&public_id).await? => {
                Err(DbError::stale(ENTITY, public_id, account.version()))
            }
            None => Err(DbError::not_found(ENTITY, public_id)),
        }
    }

    /// Counts all accounts (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn exists(&self, public_id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM accounts WHERE public_id = ?1")
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
