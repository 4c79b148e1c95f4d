//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::str::FromStr;

use chrono::Utc;
use ledger_service::db::DbPool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

/// In-memory SQLite pool with the full schema applied.
///
/// Capped at a single connection: every pooled connection to
/// `sqlite::memory:` would otherwise open its own private database.
/// Foreign keys are on, as in the production pool, so cascade and
/// set-null behavior can be exercised.
pub async fn test_pool() -> DbPool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("invalid connection string")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// Insert a customer row and return its id.
pub async fn create_customer(pool: &DbPool, email: &str, full_name: &str) -> Uuid {
    let id = Uuid::new_v4();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO customers (id, email, full_name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(email)
    .bind(full_name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("failed to insert customer");
    id
}

/// Insert an account row with the given balance and return its id.
pub async fn create_account(
    pool: &DbPool,
    number: i64,
    customer_id: Uuid,
    balance_cents: i64,
) -> Uuid {
    let id = Uuid::new_v4();
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO accounts (id, number, customer_id, balance_cents, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(number)
    .bind(customer_id)
    .bind(balance_cents)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("failed to insert account");
    id
}

/// Current balance of an account, in cents.
pub async fn balance_of(pool: &DbPool, account_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT balance_cents FROM accounts WHERE id = ?")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .expect("failed to read balance")
}

/// Number of transfer records matching (from, to, amount).
pub async fn transfer_count(pool: &DbPool, from: Uuid, to: Uuid, amount_cents: i64) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM transfers WHERE from_account_id = ? AND to_account_id = ? AND amount_cents = ?",
    )
    .bind(from)
    .bind(to)
    .bind(amount_cents)
    .fetch_one(pool)
    .await
    .expect("failed to count transfers")
}
