//! # Transaction Service
//!
//! Records transactions as PENDING. No account balance is touched.

use bank_core::validation::validate_create_transaction;
use bank_core::{Failure, Transaction};
use bank_db::{Database, TransactionRepository};
use tracing::info;
use uuid::Uuid;

use crate::dto::{CreateTransactionRequest, TransactionResponse};
use crate::ServiceResult;

#[derive(Debug, Clone)]
pub struct TransactionService {
    transactions: TransactionRepository,
}

impl TransactionService {
    pub fn new(db: &Database) -> Self {
        TransactionService {
            transactions: db.transactions(),
        }
    }

    /// Validates and records a transaction.
    ///
    /// ## Returns
    /// * `Ok(TransactionResponse)` - The PENDING record
    /// * `Err(Failure::Validation)` - A field rule failed
    ///
    /// Account ids are recorded as given. They are not looked up in the
    /// account table.
    pub async fn create(
        &self,
        request: CreateTransactionRequest,
    ) -> ServiceResult<TransactionResponse> {
        validate_create_transaction(
            request.from_account_id,
            request.to_account_id,
            request.amount,
            request.kind,
            request.description.as_deref(),
        )?;

        let (Some(from), Some(to), Some(amount), Some(kind)) = (
            request.from_account_id,
            request.to_account_id,
            request.amount,
            request.kind,
        ) else {
            return Err(Failure::unclassified("validated transaction request lost a field"));
        };

        let tx = Transaction::record(from, to, amount, kind, request.description);
        let saved = self.transactions.insert(&tx).await?;

        info!(
            public_id = %saved.public_id,
            kind = ?saved.kind,
            amount = %saved.amount,
            "Transaction recorded"
        );
        Ok(TransactionResponse::from(&saved))
    }

    pub async fn find_by_public_id(&self, public_id: Uuid) -> ServiceResult<TransactionResponse> {
        let tx = self
            .transactions
            .get_by_public_id(public_id)
            .await?
            .ok_or_else(|| Failure::not_found(public_id))?;

        Ok(TransactionResponse::from(&tx))
    }
}
