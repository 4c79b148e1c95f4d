//! Transfer engine - core business logic for moving funds between accounts.
//!
//! This service handles:
//! - Account and amount validation
//! - Atomic balance updates
//! - Writing the immutable transfer record
//!
//! # Atomicity Guarantees
//!
//! All balance updates happen within a database transaction, and the
//! debit is a single conditional UPDATE (`... WHERE balance_cents >= ?`)
//! rather than a read-then-write, so concurrent transfers against the
//! same source account can never overdraw it. The transfer record is
//! inserted in the same transaction as the balance movement: every
//! committed movement has exactly one corresponding transfer row.

use crate::{db::DbPool, error::AppError, models::transfer::Transfer};
use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

/// Validate the account pair and amount for a transfer or scheduled payment.
///
/// These are the checks that need no database access: a transfer from an
/// account to itself is invalid, and amounts must be strictly positive.
/// Account existence is checked against the store by the caller.
///
/// # Errors
///
/// - `InvalidAccounts`: Source and destination are the same account
/// - `InvalidAmount`: Amount is zero or negative
pub(crate) fn validate_transfer_params(
    from_account_id: Uuid,
    to_account_id: Uuid,
    amount_cents: i64,
) -> Result<(), AppError> {
    if from_account_id == to_account_id {
        return Err(AppError::InvalidAccounts);
    }
    if amount_cents <= 0 {
        return Err(AppError::InvalidAmount);
    }
    Ok(())
}

/// Check that both account rows exist.
///
/// Callers have already rejected `from == to`, so a count of anything
/// other than two means at least one reference is dangling.
pub(crate) async fn ensure_accounts_exist(
    conn: &mut SqliteConnection,
    from_account_id: Uuid,
    to_account_id: Uuid,
) -> Result<(), AppError> {
    let present: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE id IN (?, ?)")
        .bind(from_account_id)
        .bind(to_account_id)
        .fetch_one(&mut *conn)
        .await?;

    if present != 2 {
        return Err(AppError::InvalidAccounts);
    }
    Ok(())
}

/// Execute a transfer (move money between accounts).
///
/// # Process
///
/// 1. Validate the account pair and amount
/// 2. Start a database transaction
/// 3. Conditionally debit the source, credit the destination
/// 4. Record the transfer
/// 5. Commit (or rollback on error)
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `from_account_id` - Account to debit
/// * `to_account_id` - Account to credit
/// * `amount_cents` - Amount to move (must be positive)
///
/// # Returns
///
/// The created transfer record
///
/// # Errors
///
/// - `InvalidAccounts`: Missing account, or source equals destination
/// - `InvalidAmount`: Amount is zero or negative
/// - `InsufficientFunds`: Source balance doesn't cover the amount
/// - `Database`: Database error occurred
pub async fn execute_transfer(
    pool: &DbPool,
    from_account_id: Uuid,
    to_account_id: Uuid,
    amount_cents: i64,
) -> Result<Transfer, AppError> {
    // Start database transaction
    let mut tx = pool.begin().await?;

    let transfer =
        match transfer_in_tx(&mut tx, from_account_id, to_account_id, amount_cents).await {
            Ok(transfer) => transfer,
            Err(err) => {
                tx.rollback().await?;
                return Err(err);
            }
        };

    // Commit balance movement and transfer record atomically
    tx.commit().await?;

    Ok(transfer)
}

/// Execute the transfer protocol on an existing database transaction.
///
/// The scheduler calls this so that the transfer and the schedule's
/// fulfillment update commit (or roll back) together. The caller owns the
/// transaction: nothing here is visible until it commits.
pub(crate) async fn transfer_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    from_account_id: Uuid,
    to_account_id: Uuid,
    amount_cents: i64,
) -> Result<Transfer, AppError> {
    // Validate before any mutation, all-or-nothing
    validate_transfer_params(from_account_id, to_account_id, amount_cents)?;
    ensure_accounts_exist(&mut **tx, from_account_id, to_account_id).await?;

    let now = Utc::now();

    // Conditional debit: a single atomic compare-and-update. The WHERE
    // clause only matches while the balance covers the amount, so two
    // concurrent transfers can't both drain the same funds.
    let debited = sqlx::query(
        r#"
        UPDATE accounts
        SET balance_cents = balance_cents - ?,
            updated_at = ?
        WHERE id = ? AND balance_cents >= ?
        "#,
    )
    .bind(amount_cents)
    .bind(now)
    .bind(from_account_id)
    .bind(amount_cents)
    .execute(&mut **tx)
    .await?
    .rows_affected();

    // Zero rows means the balance was insufficient (or the account
    // vanished concurrently); nothing has changed.
    if debited == 0 {
        return Err(AppError::InsufficientFunds);
    }

    // Relative credit, not an overwrite of a previously read value, so it
    // stays correct under concurrent credits to the destination.
    let credited = sqlx::query(
        r#"
        UPDATE accounts
        SET balance_cents = balance_cents + ?,
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(amount_cents)
    .bind(now)
    .bind(to_account_id)
    .execute(&mut **tx)
    .await?
    .rows_affected();

    if credited == 0 {
        return Err(AppError::InvalidAccounts);
    }

    // Record the transfer in the same transaction as the balance movement
    let transfer = sqlx::query_as::<_, Transfer>(
        r#"
        INSERT INTO transfers (id, from_account_id, to_account_id, amount_cents, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(from_account_id)
    .bind(to_account_id)
    .bind(amount_cents)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(transfer)
}

/// Get transfer by ID.
pub async fn get_transfer_by_id(
    pool: &DbPool,
    transfer_id: Uuid,
) -> Result<Option<Transfer>, AppError> {
    let transfer = sqlx::query_as::<_, Transfer>("SELECT * FROM transfers WHERE id = ?")
        .bind(transfer_id)
        .fetch_optional(pool)
        .await?;

    Ok(transfer)
}
