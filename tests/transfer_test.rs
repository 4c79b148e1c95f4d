//! Transfer engine behavior against an in-memory store.

mod common;

use common::{balance_of, create_account, create_customer, test_pool, transfer_count};
use ledger_service::{error::AppError, services::transfer_service};
use uuid::Uuid;

#[tokio::test]
async fn transfer_moves_funds_and_records_exactly_one_transfer() {
    let pool = test_pool().await;
    let customer = create_customer(&pool, "test@test.invalid", "Test Customer").await;
    let account1 = create_account(&pool, 123, customer, 100_000).await;
    let account2 = create_account(&pool, 456, customer, 100_000).await;

    let transfer = transfer_service::execute_transfer(&pool, account1, account2, 10_000)
        .await
        .expect("transfer should succeed");

    assert_eq!(transfer.from_account_id, account1);
    assert_eq!(transfer.to_account_id, account2);
    assert_eq!(transfer.amount_cents, 10_000);

    let balance1 = balance_of(&pool, account1).await;
    let balance2 = balance_of(&pool, account2).await;
    assert_eq!(balance1, 90_000);
    assert_eq!(balance2, 110_000);
    // Money is conserved: the sum of both balances is unchanged
    assert_eq!(balance1 + balance2, 200_000);

    assert_eq!(transfer_count(&pool, account1, account2, 10_000).await, 1);
}

#[tokio::test]
async fn transfer_with_invalid_accounts_changes_nothing() {
    let pool = test_pool().await;
    let customer = create_customer(&pool, "test@test.invalid", "Test Customer").await;
    let account1 = create_account(&pool, 123, customer, 100_000).await;
    let account2 = create_account(&pool, 456, customer, 100_000).await;
    let missing = Uuid::new_v4();

    // Source equals destination
    let err = transfer_service::execute_transfer(&pool, account1, account1, 10_000)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAccounts));

    // Source account does not exist
    let err = transfer_service::execute_transfer(&pool, missing, account2, 10_000)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAccounts));

    // Destination account does not exist
    let err = transfer_service::execute_transfer(&pool, account1, missing, 10_000)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAccounts));

    assert_eq!(balance_of(&pool, account1).await, 100_000);
    assert_eq!(balance_of(&pool, account2).await, 100_000);
    assert_eq!(transfer_count(&pool, account1, account2, 10_000).await, 0);
}

#[tokio::test]
async fn transfer_with_non_positive_amount_is_rejected() {
    let pool = test_pool().await;
    let customer = create_customer(&pool, "test@test.invalid", "Test Customer").await;
    let account1 = create_account(&pool, 123, customer, 100_000).await;
    let account2 = create_account(&pool, 456, customer, 100_000).await;

    let err = transfer_service::execute_transfer(&pool, account1, account2, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount));

    let err = transfer_service::execute_transfer(&pool, account1, account2, -1_000)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount));

    assert_eq!(balance_of(&pool, account1).await, 100_000);
    assert_eq!(balance_of(&pool, account2).await, 100_000);

    let any_transfers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transfers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(any_transfers, 0);
}

#[tokio::test]
async fn insufficient_funds_leaves_state_untouched_and_is_retryable() {
    let pool = test_pool().await;
    let customer = create_customer(&pool, "test@test.invalid", "Test Customer").await;
    let account1 = create_account(&pool, 123, customer, 100_000).await;
    let account2 = create_account(&pool, 456, customer, 100_000).await;

    // More than the source balance
    let err = transfer_service::execute_transfer(&pool, account1, account2, 1_000_000)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientFunds));

    assert_eq!(balance_of(&pool, account1).await, 100_000);
    assert_eq!(balance_of(&pool, account2).await, 100_000);

    // A later transfer of the entire balance still succeeds
    transfer_service::execute_transfer(&pool, account1, account2, 100_000)
        .await
        .expect("full-balance transfer should succeed");

    assert_eq!(balance_of(&pool, account1).await, 0);
    assert_eq!(balance_of(&pool, account2).await, 200_000);
    assert_eq!(transfer_count(&pool, account1, account2, 100_000).await, 1);
}
