//! HTTP surface checks: the admin endpoints over the full router.

mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::Utc;
use common::test_pool;
use ledger_service::app::build_router;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Send a request with an optional JSON body, returning status and parsed
/// response body.
async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create a customer and two funded accounts through the API, returning
/// (customer_id, account1_id, account2_id) as JSON strings.
async fn seed_accounts(app: &Router, balance_cents: i64) -> (String, String, String) {
    let (status, customer) = send_json(
        app,
        "POST",
        "/api/v1/customers",
        Some(json!({"email": "test@test.invalid", "full_name": "Test Customer"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let customer_id = customer["id"].as_str().unwrap().to_string();

    let mut account_ids = Vec::new();
    for number in [123, 456] {
        let (status, account) = send_json(
            app,
            "POST",
            "/api/v1/accounts",
            Some(json!({
                "number": number,
                "customer_id": customer_id,
                "initial_balance_cents": balance_cents
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        account_ids.push(account["id"].as_str().unwrap().to_string());
    }

    (customer_id, account_ids.remove(0), account_ids.remove(0))
}

#[tokio::test]
async fn health_endpoint_reports_connected_database() {
    let app = build_router(test_pool().await);

    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn transfer_endpoint_moves_funds_and_reports_errors() {
    let app = build_router(test_pool().await);
    let (_customer_id, account1, account2) = seed_accounts(&app, 100_000).await;

    // A valid transfer succeeds and is visible in the account balances
    let (status, transfer) = send_json(
        &app,
        "POST",
        "/api/v1/transfers",
        Some(json!({
            "from_account_id": account1,
            "to_account_id": account2,
            "amount_cents": 10_000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(transfer["amount_cents"], 10_000);

    let (status, account) =
        send_json(&app, "GET", &format!("/api/v1/accounts/{account1}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["balance_cents"], 90_000);

    // Transferring an account to itself is a validation error
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/v1/transfers",
        Some(json!({
            "from_account_id": account1,
            "to_account_id": account1,
            "amount_cents": 10_000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_accounts");

    // Overdrawing is a business-rule error
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/v1/transfers",
        Some(json!({
            "from_account_id": account1,
            "to_account_id": account2,
            "amount_cents": 1_000_000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "insufficient_funds");
}

#[tokio::test]
async fn transfer_records_cannot_be_modified_over_http() {
    let app = build_router(test_pool().await);
    let (_customer_id, account1, account2) = seed_accounts(&app, 100_000).await;

    let (status, transfer) = send_json(
        &app,
        "POST",
        "/api/v1/transfers",
        Some(json!({
            "from_account_id": account1,
            "to_account_id": account2,
            "amount_cents": 10_000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let transfer_id = transfer["id"].as_str().unwrap();

    // The record is readable but accepts neither delete nor update
    let uri = format!("/api/v1/transfers/{transfer_id}");
    let (status, _) = send_json(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send_json(&app, "PUT", &uri, Some(json!({"amount_cents": 1}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn scheduled_payment_flow_over_http() {
    let app = build_router(test_pool().await);
    let (_customer_id, account1, account2) = seed_accounts(&app, 100_000).await;
    let today = Utc::now().date_naive();

    // The fulfillment reference in the request is ignored: it is read-only
    let (status, payment) = send_json(
        &app,
        "POST",
        "/api/v1/scheduled-payments",
        Some(json!({
            "from_account_id": account1,
            "to_account_id": account2,
            "amount_cents": 10_000,
            "transfer_id": "770e8400-e29b-41d4-a716-446655440002"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payment["scheduled_date"], today.to_string());
    assert_eq!(payment["is_paid"], false);
    assert_eq!(payment["transfer_id"], Value::Null);
    let payment_id = payment["id"].as_str().unwrap().to_string();

    // Scheduling in the past is rejected
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/v1/scheduled-payments",
        Some(json!({
            "from_account_id": account1,
            "to_account_id": account2,
            "amount_cents": 10_000,
            "scheduled_date": "2020-01-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_scheduled_date");

    // The batch trigger fulfills the due payment
    let (status, summary) =
        send_json(&app, "POST", "/api/v1/scheduled-payments/run", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["executed"], 1);
    assert_eq!(summary["skipped"], 0);

    let (status, payment) = send_json(
        &app,
        "GET",
        &format!("/api/v1/scheduled-payments/{payment_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payment["is_paid"], true);
    assert!(payment["transfer_id"].is_string());

    let (status, account) =
        send_json(&app, "GET", &format!("/api/v1/accounts/{account2}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["balance_cents"], 110_000);
}

#[tokio::test]
async fn deleting_an_account_clears_the_default_account_reference() {
    let app = build_router(test_pool().await);
    let (customer_id, account1, account2) = seed_accounts(&app, 100_000).await;

    // Point the customer's default account at account1
    let (status, customer) = send_json(
        &app,
        "PUT",
        &format!("/api/v1/customers/{customer_id}"),
        Some(json!({
            "email": "test@test.invalid",
            "full_name": "Test Customer",
            "default_account_id": account1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(customer["default_account_id"].as_str().unwrap(), account1);

    // Removing the account nulls the weak reference instead of failing
    let (status, _) =
        send_json(&app, "DELETE", &format!("/api/v1/accounts/{account1}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, customer) = send_json(
        &app,
        "GET",
        &format!("/api/v1/customers/{customer_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(customer["default_account_id"], Value::Null);

    // The other account is untouched
    let (status, _) = send_json(&app, "GET", &format!("/api/v1/accounts/{account2}"), None).await;
    assert_eq!(status, StatusCode::OK);
}
