//! # Request and Response DTOs
//!
//! Wire shapes for the account and transaction services. Request fields are
//! all optional so a missing field becomes a field violation rather than a
//! parse error. Money leaves as a JSON number with its scale (`150.00`) and
//! is accepted as either a number or a string.

use bank_core::{Account, AccountStatus, AccountUpdate, Transaction, TransactionStatus, TransactionType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `dd-MM-yyyy hh:mm` (12-hour clock, no meridiem).
pub const ACCOUNT_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %I:%M";

/// `dd-MM-yyyy HH:mm:ss`.
pub const TRANSACTION_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

fn format_at(at: DateTime<Utc>, pattern: &str) -> String {
    at.format(pattern).to_string()
}

// =============================================================================
// Account
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub name: Option<String>,
    pub document: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub document: Option<String>,
    pub balance: Option<Decimal>,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(request: UpdateAccountRequest) -> Self {
        AccountUpdate {
            name: request.name,
            document: request.document,
            balance: request.balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub public_id: Uuid,
    pub name: String,
    pub document: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
    pub status: AccountStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        AccountResponse {
            public_id: account.public_id(),
            name: account.name().to_string(),
            document: account.document().to_string(),
            balance: account.balance(),
            status: account.status(),
            created_at: format_at(account.created_at(), ACCOUNT_TIMESTAMP_FORMAT),
            updated_at: format_at(account.updated_at(), ACCOUNT_TIMESTAMP_FORMAT),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub from_account_id: Option<Uuid>,
    pub to_account_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub public_id: Uuid,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: Option<String>,
    pub status: TransactionStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        TransactionResponse {
            public_id: tx.public_id,
            from_account_id: tx.from_account_id,
            to_account_id: tx.to_account_id,
            amount: tx.amount,
            kind: tx.kind,
            description: tx.description.clone(),
            status: tx.status,
            created_at: format_at(tx.created_at, TRANSACTION_TIMESTAMP_FORMAT),
            updated_at: format_at(tx.updated_at, TRANSACTION_TIMESTAMP_FORMAT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bank_core::AccountSnapshot;
    use chrono::TimeZone;

    #[test]
    fn test_account_response_shape() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 21, 5, 0).unwrap();
        let account = Account::restore(AccountSnapshot {
            public_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            name: "João Silva".to_string(),
            document: "12345678901".to_string(),
            balance: Decimal::new(15000, 2),
            status: AccountStatus::Active,
            created_at: at,
            updated_at: at,
            version: 2,
        });

        let raw = serde_json::to_string(&AccountResponse::from(&account)).unwrap();
        assert!(raw.contains(r#""balance":150.00,"#));

        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["publicId"], "550e8400-e29b-41d4-a716-446655440000");
        assert!(json["balance"].is_number());
        assert_eq!(json["status"], "ACTIVE");
        assert_eq!(json["createdAt"], "09-03-2024 09:05");
        assert!(json.get("version").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_transaction_request_uses_type_key() {
        let request: CreateTransactionRequest = serde_json::from_str(
            r#"{
                "fromAccountId": "550e8400-e29b-41d4-a716-446655440000",
                "toAccountId": "f47ac10b-58cc-4372-a567-0e02b2c3d479",
                "amount": "25.50",
                "type": "TRANSFER"
            }"#,
        )
        .unwrap();

        assert_eq!(request.kind, Some(TransactionType::Transfer));
        assert_eq!(request.amount, Some(Decimal::new(2550, 2)));
        assert!(request.description.is_none());
    }

    #[test]
    fn test_transaction_response_timestamp_is_24_hour() {
        let mut tx = Transaction::record(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::ONE,
            TransactionType::Deposit,
            None,
        );
        tx.created_at = Utc.with_ymd_and_hms(2024, 3, 9, 21, 5, 7).unwrap();

        let response = TransactionResponse::from(&tx);
        assert_eq!(response.created_at, "09-03-2024 21:05:07");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "DEPOSIT");
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn test_amount_is_a_number_with_scale() {
        let tx = Transaction::record(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::new(99_999_999, 2),
            TransactionType::Transfer,
            None,
        );

        let raw = serde_json::to_string(&TransactionResponse::from(&tx)).unwrap();
        assert!(raw.contains(r#""amount":999999.99,"#));
    }

    #[test]
    fn test_numeric_balance_is_accepted() {
        let request: UpdateAccountRequest =
            serde_json::from_str(r#"{"balance": 1500.70}"#).unwrap();
        assert_eq!(request.balance.unwrap().to_string(), "1500.70");

        let request: UpdateAccountRequest =
            serde_json::from_str(r#"{"balance": "1500.70"}"#).unwrap();
        assert_eq!(request.balance.unwrap().to_string(), "1500.70");
    }
}
