//! # Database Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Constraint name parsed, context added         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Failure (bank-core) ← Classified: NotFound / Conflict / Internal      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ErrorEnvelope ← One uniform body per failure                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bank_core::{Conflict, Failure};
use thiserror::Error;
use tracing::{debug, warn};

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - No row with the requested public id
    /// - `UPDATE` matched nothing and the row does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Opening a second account with an existing document
    /// - Public id collision (practically impossible with v4)
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation. The current schema declares no
    /// foreign keys; the variant keeps the SQLite error mapping total.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK or NOT NULL constraint violation.
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Optimistic version check failed: the row changed after it was read.
    #[error("{entity} {id} was modified concurrently (expected version {expected})")]
    StaleWrite {
        entity: String,
        id: String,
        expected: i64,
    },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Pool is closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Runtime SQL error not covered by a more specific variant.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error, including rows that fail to decode.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a StaleWrite error.
    pub fn stale(entity: impl Into<String>, id: impl Into<String>, expected: i64) -> Self {
        DbError::StaleWrite {
            entity: entity.into(),
            id: id.into(),
            expected,
        }
    }

    /// Wraps a column value that could not be decoded into a domain type.
    pub fn corrupt(column: &str, err: impl std::fmt::Display) -> Self {
        DbError::Internal(format!("corrupt value in column '{column}': {err}"))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // UNIQUE: "UNIQUE constraint failed: accounts.document"
                // FK:     "FOREIGN KEY constraint failed"
                // CHECK:  "CHECK constraint failed: ..."
                if let Some(field) = msg.split("UNIQUE constraint failed: ").nth(1) {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed")
                    || msg.contains("NOT NULL constraint failed")
                {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Classifies storage errors into the shared failure taxonomy.
///
/// ## Mapping
/// ```text
/// NotFound              → Failure::NotFound (key = looked-up id)
/// UniqueViolation       → Conflict::Duplicate
/// ForeignKeyViolation   → Conflict::ReferentialIntegrity
/// ConstraintViolation   → Conflict::Integrity
/// StaleWrite            → Conflict::StaleWrite
/// everything else       → Failure::Internal (detail logged, never shown)
/// ```
impl From<DbError> for Failure {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                debug!(entity = %entity, id = %id, "Lookup found nothing");
                Failure::not_found(id)
            }
            DbError::UniqueViolation { field, .. } => {
                debug!(field = %field, "Unique constraint rejected write");
                Conflict::Duplicate.into()
            }
            DbError::ForeignKeyViolation { message } => {
                debug!(message = %message, "Foreign key rejected write");
                Conflict::ReferentialIntegrity.into()
            }
            DbError::ConstraintViolation { message } => {
                debug!(message = %message, "Constraint rejected write");
                Conflict::Integrity.into()
            }
            DbError::StaleWrite { entity, id, expected } => {
                warn!(entity = %entity, id = %id, expected, "Concurrent modification detected");
                Conflict::StaleWrite.into()
            }
            other => Failure::unclassified(other),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_pool_errors() {
        let timed_out: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(timed_out, DbError::PoolExhausted));

        let closed: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(closed, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_classification_into_failure() {
        let not_found: Failure = DbError::not_found("Account", "abc").into();
        assert_eq!(not_found, Failure::not_found("abc"));

        let duplicate: Failure = DbError::duplicate("accounts.document", "123").into();
        assert_eq!(duplicate, Failure::Conflict(Conflict::Duplicate));

        let stale: Failure = DbError::stale("Account", "abc", 1).into();
        assert_eq!(stale, Failure::Conflict(Conflict::StaleWrite));

        let fk: Failure = DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();
        assert_eq!(fk, Failure::Conflict(Conflict::ReferentialIntegrity));

        let internal: Failure = DbError::PoolExhausted.into();
        assert_eq!(internal.kind(), bank_core::ErrorKind::Internal);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            DbError::not_found("Account", "abc").to_string(),
            "Account not found: abc"
        );
        assert_eq!(
            DbError::stale("Account", "abc", 3).to_string(),
            "Account abc was modified concurrently (expected version 3)"
        );
    }
}
