//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /api/v1/accounts - Create new account
//! - GET /api/v1/accounts - List all accounts
//! - GET /api/v1/accounts/:id - Get account by ID
//! - DELETE /api/v1/accounts/:id - Delete account
//!
//! There is deliberately no update endpoint: balances move only through
//! the transfer engine, never through direct writes.

use crate::{
    db::DbPool,
    error::AppError,
    models::account::{Account, AccountResponse, CreateAccountRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

/// Create a new account.
///
/// # Endpoint
///
/// `POST /api/v1/accounts`
///
/// # Request Body
///
/// ```json
/// {
///   "number": 123,
///   "customer_id": "550e8400-e29b-41d4-a716-446655440000",
///   "initial_balance_cents": 10000
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the created account
/// - **Error (400)**: Non-positive or already-taken account number, or
///   negative initial balance
/// - **Error (404)**: Owning customer not found
/// - **Error (500)**: Database error
pub async fn create_account(
    State(pool): State<DbPool>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    if request.number <= 0 {
        return Err(AppError::InvalidRequest(
            "Account number must be positive".to_string(),
        ));
    }
    if request.initial_balance_cents < 0 {
        return Err(AppError::InvalidRequest(
            "Initial balance must not be negative".to_string(),
        ));
    }

    // The owner must exist before the insert so the client gets a 404,
    // not a foreign-key violation
    let owner_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?)")
            .bind(request.customer_id)
            .fetch_one(&pool)
            .await?;
    if !owner_exists {
        return Err(AppError::CustomerNotFound);
    }

    let now = Utc::now();
    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (id, number, customer_id, balance_cents, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.number)
    .bind(request.customer_id)
    .bind(request.initial_balance_cents)
    .bind(now)
    .bind(now)
    .fetch_one(&pool)
    .await
    .map_err(|err| {
        // Surface the unique account number collision as a client error
        if err
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            AppError::InvalidRequest("Account number already exists".to_string())
        } else {
            AppError::Database(err)
        }
    })?;

    Ok(Json(account.into()))
}

/// List all accounts, newest first.
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "number": 123,
///     "customer_id": "660e8400-e29b-41d4-a716-446655440001",
///     "balance_cents": 100000,
///     "created_at": "2026-01-05T10:00:00Z",
///     "updated_at": "2026-01-05T10:00:00Z"
///   }
/// ]
/// ```
pub async fn list_accounts(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let accounts = sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at DESC")
        .fetch_all(&pool)
        .await?;

    let responses: Vec<AccountResponse> = accounts.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get a specific account by ID.
///
/// # Response
///
/// - **Success (200 OK)**: Returns account details, including the current
///   balance
/// - **Error (404)**: Account not found
pub async fn get_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?")
        .bind(account_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    Ok(Json(account.into()))
}

/// Delete an account.
///
/// Cascades to the transfers and scheduled payments the account appears
/// in, and clears any customer default-account reference pointing at it.
///
/// # Response
///
/// - **Success (204 No Content)**
/// - **Error (404)**: Account not found
pub async fn delete_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM accounts WHERE id = ?")
        .bind(account_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::AccountNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
