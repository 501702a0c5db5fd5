//! # bank-service: Account and Transaction Services
//!
//! The orchestration layer. Each operation parses, validates, loads, mutates
//! and saves, and every failure is one [`bank_core::Failure`] that
//! [`boundary::respond`] turns into exactly one error envelope.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     bank-service (THIS CRATE)                           │
//! │                                                                         │
//! │   ┌──────────┐   ┌────────────────┐   ┌────────────────────┐           │
//! │   │ boundary │──►│ AccountService │──►│ bank-db repos      │           │
//! │   │ parse/   │   │ Transaction-   │   │ (version-checked   │           │
//! │   │ respond  │◄──│ Service        │◄──│  saves)            │           │
//! │   └──────────┘   └────────────────┘   └────────────────────┘           │
//! │        ▲                  │                                             │
//! │        │                  ▼                                             │
//! │   ErrorEnvelope     bank-core (lifecycle, validation, translate)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use bank_service::{boundary, BankServices, ServiceConfig};
//!
//! let config = ServiceConfig::load()?;
//! bank_service::telemetry::init(&config.log_filter);
//! let services = BankServices::connect(&config).await?;
//!
//! let id = boundary::parse_public_id("publicId", raw_id);
//! let outcome = match id {
//!     Ok(id) => services.accounts.soft_delete(id).await,
//!     Err(failure) => Err(failure),
//! };
//! match boundary::respond(outcome) {
//!     Ok(account) => { /* 200 with account */ }
//!     Err(envelope) => { /* envelope.status() with envelope.to_json() */ }
//! }
//! ```

pub mod account_service;
pub mod boundary;
pub mod config;
pub mod dto;
pub mod telemetry;
pub mod transaction_service;

use bank_core::Failure;
use bank_db::{Database, DbResult};
use tracing::info;

pub use account_service::AccountService;
pub use config::{ConfigError, ServiceConfig};
pub use transaction_service::TransactionService;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, Failure>;

/// Both services over one shared database handle.
#[derive(Debug, Clone)]
pub struct BankServices {
    pub db: Database,
    pub accounts: AccountService,
    pub transactions: TransactionService,
}

impl BankServices {
    /// Builds the services on an already opened database.
    pub fn new(db: Database) -> Self {
        BankServices {
            accounts: AccountService::new(&db),
            transactions: TransactionService::new(&db),
            db,
        }
    }

    /// Opens the configured database (applying migrations) and builds the
    /// services on it.
    pub async fn connect(config: &ServiceConfig) -> DbResult<Self> {
        let db = Database::new(config.db_config()).await?;
        info!(path = %config.database_path, "Bank services ready");
        Ok(BankServices::new(db))
    }
}
