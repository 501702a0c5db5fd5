//! # Account Service
//!
//! Orchestrates the account operations. Every mutating call follows the same
//! pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate ──► load by public id ──► mutate (bank-core) ──► save        │
//! │     │               │                    │                   │          │
//! │     ▼               ▼                    ▼                   ▼          │
//! │  Validation     NotFound            Conflict (409)     Conflict (stale, │
//! │  (400)          (404)               transition         duplicate doc)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The save carries the version read at load time, so two racing
//! transitions on the same account cannot both succeed.

use bank_core::validation::{validate_create_account, validate_update_account};
use bank_core::{Account, AccountUpdate, Failure};
use bank_db::{AccountRepository, Database};
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::{AccountResponse, CreateAccountRequest, UpdateAccountRequest};
use crate::ServiceResult;

#[derive(Debug, Clone)]
pub struct AccountService {
    accounts: AccountRepository,
}

impl AccountService {
    pub fn new(db: &Database) -> Self {
        AccountService {
            accounts: db.accounts(),
        }
    }

    /// Opens an account: zero balance, ACTIVE.
    ///
    /// ## Returns
    /// * `Ok(AccountResponse)` - The stored account
    /// * `Err(Failure::Validation)` - Name or document breaks a field rule
    /// * `Err(Failure::Conflict)` - Document already registered
    pub async fn create(&self, request: CreateAccountRequest) -> ServiceResult<AccountResponse> {
        validate_create_account(request.name.as_deref(), request.document.as_deref())?;

        let account = Account::open(
            request.name.unwrap_or_default(),
            request.document.unwrap_or_default(),
        );
        let saved = self.accounts.insert(&account).await?;

        info!(public_id = %saved.public_id(), "Account opened");
        Ok(AccountResponse::from(&saved))
    }

    /// Lists every account, whatever its status.
    pub async fn find_all(&self) -> ServiceResult<Vec<AccountResponse>> {
        let accounts = self.accounts.find_all().await?;
        Ok(accounts.iter().map(AccountResponse::from).collect())
    }

    pub async fn find_by_public_id(&self, public_id: Uuid) -> ServiceResult<AccountResponse> {
        let account = self.load(public_id).await?;
        Ok(AccountResponse::from(&account))
    }

    /// Replaces the supplied fields. Absent fields keep their values.
    ///
    /// Updates are allowed whatever the account's status.
    pub async fn update(
        &self,
        public_id: Uuid,
        request: UpdateAccountRequest,
    ) -> ServiceResult<AccountResponse> {
        let update = AccountUpdate::from(request);
        validate_update_account(&update)?;

        let mut account = self.load(public_id).await?;
        account.apply_update(update);
        let saved = self.accounts.update(&account).await?;

        info!(public_id = %public_id, version = saved.version(), "Account updated");
        Ok(AccountResponse::from(&saved))
    }

    /// Deactivates an account. Requires ACTIVE status and a zero balance.
    pub async fn soft_delete(&self, public_id: Uuid) -> ServiceResult<AccountResponse> {
        let mut account = self.load(public_id).await?;

        if let Err(conflict) = account.deactivate() {
            warn!(public_id = %public_id, reason = conflict.code(), "Deactivation refused");
            return Err(conflict.into());
        }
        let saved = self.accounts.update(&account).await?;

        info!(public_id = %public_id, "Account deactivated");
        Ok(AccountResponse::from(&saved))
    }

    /// Reactivates an INACTIVE account.
    pub async fn reactivate(&self, public_id: Uuid) -> ServiceResult<AccountResponse> {
        let mut account = self.load(public_id).await?;

        if let Err(conflict) = account.reactivate() {
            warn!(public_id = %public_id, reason = conflict.code(), "Reactivation refused");
            return Err(conflict.into());
        }
        let saved = self.accounts.update(&account).await?;

        info!(public_id = %public_id, "Account reactivated");
        Ok(AccountResponse::from(&saved))
    }

    async fn load(&self, public_id: Uuid) -> ServiceResult<Account> {
        self.accounts
            .get_by_public_id(public_id)
            .await?
            .ok_or_else(|| Failure::not_found(public_id))
    }
}
