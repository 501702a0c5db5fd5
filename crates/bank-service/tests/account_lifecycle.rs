//! End-to-end account flows against an in-memory database.

use bank_core::{AccountStatus, ErrorKind, Failure};
use bank_db::{Database, DbConfig};
use bank_service::boundary::{parse_json, parse_public_id, respond};
use bank_service::dto::{CreateAccountRequest, UpdateAccountRequest};
use bank_service::BankServices;
use rust_decimal::Decimal;
use uuid::Uuid;

async fn services() -> BankServices {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    BankServices::new(db)
}

fn create_request(name: &str, document: &str) -> CreateAccountRequest {
    CreateAccountRequest {
        name: Some(name.to_string()),
        document: Some(document.to_string()),
    }
}

async fn fund(services: &BankServices, public_id: Uuid, balance: Decimal) {
    services
        .accounts
        .update(
            public_id,
            UpdateAccountRequest {
                balance: Some(balance),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_opens_active_account_with_zero_balance() {
    let services = services().await;

    let created = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();

    assert_eq!(created.name, "João Silva");
    assert_eq!(created.document, "12345678901");
    assert_eq!(created.balance, Decimal::ZERO);
    assert_eq!(created.status, AccountStatus::Active);

    let found = services
        .accounts
        .find_by_public_id(created.public_id)
        .await
        .unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_soft_delete_zero_balance_account() {
    let services = services().await;
    let created = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();

    let deleted = services.accounts.soft_delete(created.public_id).await.unwrap();

    assert_eq!(deleted.status, AccountStatus::Inactive);
    assert_eq!(deleted.public_id, created.public_id);
    assert_eq!(deleted.balance, Decimal::ZERO);
}

#[tokio::test]
async fn test_soft_delete_with_balance_is_conflict() {
    let services = services().await;
    let created = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();
    fund(&services, created.public_id, Decimal::new(15000, 2)).await;

    let envelope = respond(services.accounts.soft_delete(created.public_id).await).unwrap_err();

    assert_eq!(envelope.status(), 409);
    assert_eq!(envelope.message(), "Cannot delete account with non-zero balance.");

    let unchanged = services
        .accounts
        .find_by_public_id(created.public_id)
        .await
        .unwrap();
    assert_eq!(unchanged.status, AccountStatus::Active);
    assert_eq!(unchanged.balance.to_string(), "150.00");
}

#[tokio::test]
async fn test_reactivate_active_account_is_conflict() {
    let services = services().await;
    let created = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();

    let envelope = respond(services.accounts.reactivate(created.public_id).await).unwrap_err();

    assert_eq!(envelope.status(), 409);
    assert_eq!(envelope.message(), "Account is already active");
}

#[tokio::test]
async fn test_deactivate_then_reactivate_round_trip() {
    let services = services().await;
    let created = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();

    services.accounts.soft_delete(created.public_id).await.unwrap();

    let again = respond(services.accounts.soft_delete(created.public_id).await).unwrap_err();
    assert_eq!(again.message(), "Account is already inactive");

    let reactivated = services.accounts.reactivate(created.public_id).await.unwrap();
    assert_eq!(reactivated.status, AccountStatus::Active);
    assert_eq!(reactivated.public_id, created.public_id);
}

#[tokio::test]
async fn test_unknown_public_id_is_not_found() {
    let services = services().await;
    let unknown = Uuid::parse_str("f47ac10b-58cc-4372-a567-0e02b2c3d479").unwrap();

    let envelope = respond(services.accounts.find_by_public_id(unknown).await).unwrap_err();
    assert_eq!(envelope.status(), 404);
    assert_eq!(
        envelope.message(),
        "Entity not found with id f47ac10b-58cc-4372-a567-0e02b2c3d479"
    );

    for failure in [
        services.accounts.soft_delete(unknown).await.unwrap_err(),
        services.accounts.reactivate(unknown).await.unwrap_err(),
        services
            .accounts
            .update(unknown, UpdateAccountRequest::default())
            .await
            .unwrap_err(),
    ] {
        assert_eq!(failure.kind(), ErrorKind::NotFound);
    }
}

#[tokio::test]
async fn test_invalid_create_reports_every_field() {
    let services = services().await;

    let envelope = respond(services.accounts.create(create_request("J", "")).await).unwrap_err();

    assert_eq!(envelope.status(), 400);
    assert_eq!(envelope.message(), "Request contains validation errors");

    let details = envelope.details();
    assert_eq!(details.fields().collect::<Vec<_>>(), vec!["name", "document"]);
    assert_eq!(
        details.get("name").unwrap(),
        &["size must be between 3 and 100"]
    );
    assert_eq!(
        details.get("document").unwrap(),
        &["must not be blank", "size must be between 8 and 14"]
    );

    assert!(services.accounts.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_fields_in_body_are_blank() {
    let services = services().await;

    let request: CreateAccountRequest = parse_json("{}").unwrap();
    let failure = services.accounts.create(request).await.unwrap_err();

    let Failure::Validation(violations) = failure else {
        panic!("expected validation failure");
    };
    let fields: Vec<_> = violations.iter().map(|v| v.field().to_string()).collect();
    assert_eq!(fields, vec!["name", "document"]);
}

#[tokio::test]
async fn test_duplicate_document_is_conflict() {
    let services = services().await;
    services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();

    let envelope = respond(
        services
            .accounts
            .create(create_request("Outro Titular", "12345678901"))
            .await,
    )
    .unwrap_err();

    assert_eq!(envelope.status(), 409);
    assert_eq!(envelope.message(), "Resource already exists with provided data");
}

#[tokio::test]
async fn test_update_replaces_only_supplied_fields() {
    let services = services().await;
    let created = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();

    let request: UpdateAccountRequest =
        parse_json(r#"{"name":"João da Silva","balance":"1500.75"}"#).unwrap();
    let updated = services
        .accounts
        .update(created.public_id, request)
        .await
        .unwrap();

    assert_eq!(updated.name, "João da Silva");
    assert_eq!(updated.document, "12345678901");
    assert_eq!(updated.balance.to_string(), "1500.75");
}

#[tokio::test]
async fn test_update_rejects_negative_and_imprecise_balance() {
    let services = services().await;
    let created = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();

    let envelope = respond(
        services
            .accounts
            .update(
                created.public_id,
                UpdateAccountRequest {
                    balance: Some(Decimal::new(-1005, 3)),
                    ..Default::default()
                },
            )
            .await,
    )
    .unwrap_err();

    assert_eq!(envelope.status(), 400);
    assert_eq!(
        envelope.details().get("balance").unwrap(),
        &[
            "numeric value out of bounds (<9 digits>.<2 digits> expected)",
            "must be greater than or equal to 0"
        ]
    );
}

#[tokio::test]
async fn test_find_all_lists_every_status() {
    let services = services().await;
    let first = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();
    services
        .accounts
        .create(create_request("Maria Santos", "98765432100"))
        .await
        .unwrap();
    services.accounts.soft_delete(first.public_id).await.unwrap();

    let all = services.accounts.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].status, AccountStatus::Inactive);
    assert_eq!(all[1].status, AccountStatus::Active);
}

#[tokio::test]
async fn test_racing_deactivations_only_one_wins() {
    let services = services().await;
    let created = services
        .accounts
        .create(create_request("João Silva", "12345678901"))
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        services.accounts.soft_delete(created.public_id),
        services.accounts.soft_delete(created.public_id),
    );

    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    for outcome in &outcomes {
        if let Err(failure) = outcome {
            assert_eq!(failure.kind(), ErrorKind::Conflict);
        }
    }
}

#[tokio::test]
async fn test_path_parameter_must_be_uuid() {
    let envelope = respond(parse_public_id("publicId", "123")).unwrap_err();
    assert_eq!(envelope.status(), 400);
    assert!(envelope.details().is_empty());
}
