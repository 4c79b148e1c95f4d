//! Scheduler - turns due scheduled payments into executed transfers.
//!
//! This service handles:
//! - Creating pending scheduled payments (with date validation)
//! - Running a single due schedule: execute the transfer, mark the
//!   schedule fulfilled, and re-enroll recurring payments for the next
//!   calendar month
//! - The periodic batch entry point that processes everything due today
//!   (or overdue)
//!
//! # Fulfillment Guarantees
//!
//! A scheduled payment transitions Pending -> Fulfilled exactly once.
//! The transition is a conditional UPDATE (`... WHERE transfer_id IS
//! NULL`) executed in the same database transaction as the transfer
//! itself, so two concurrent batch runs cannot both produce a transfer
//! for the same schedule: the loser's transaction rolls back entirely.

use crate::{
    db::DbPool,
    error::AppError,
    models::scheduled_payment::ScheduledPayment,
    services::transfer_service,
};
use chrono::{Months, NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqliteConnection;
use uuid::Uuid;

/// Outcome of a due-payment batch run.
#[derive(Debug, Serialize)]
pub struct DueRunSummary {
    /// Schedules fulfilled in this run
    pub executed: u32,

    /// Schedules skipped because the source account lacked funds;
    /// they stay pending and are retried on a later run
    pub skipped: u32,
}

/// Schedule a payment.
///
/// # Process
///
/// 1. Run the same account/amount checks as a direct transfer
/// 2. Validate the scheduled date (today or later; defaults to today)
/// 3. Persist a pending scheduled payment
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `from_account_id` - Account to pay from
/// * `to_account_id` - Account to pay to
/// * `amount_cents` - Amount to pay (must be positive)
/// * `scheduled_date` - Due date; `None` means immediately due (today)
/// * `is_recurring` - Whether fulfillment re-enrolls the payment monthly
///
/// # Errors
///
/// - `InvalidAccounts`: Missing account, or source equals destination
/// - `InvalidAmount`: Amount is zero or negative
/// - `InvalidScheduledDate`: Requested date is in the past
/// - `Database`: Database error occurred
pub async fn schedule_payment(
    pool: &DbPool,
    from_account_id: Uuid,
    to_account_id: Uuid,
    amount_cents: i64,
    scheduled_date: Option<NaiveDate>,
    is_recurring: bool,
) -> Result<ScheduledPayment, AppError> {
    let mut conn = pool.acquire().await?;
    schedule_on_conn(
        &mut conn,
        from_account_id,
        to_account_id,
        amount_cents,
        scheduled_date,
        is_recurring,
    )
    .await
}

/// Validate and insert a pending scheduled payment on an existing
/// connection.
///
/// Shared by the public `schedule_payment` entry point and by
/// `run_scheduled_payment`, which re-enrolls recurring payments inside
/// its fulfillment transaction.
async fn schedule_on_conn(
    conn: &mut SqliteConnection,
    from_account_id: Uuid,
    to_account_id: Uuid,
    amount_cents: i64,
    scheduled_date: Option<NaiveDate>,
    is_recurring: bool,
) -> Result<ScheduledPayment, AppError> {
    // Same validation as a direct transfer
    transfer_service::validate_transfer_params(from_account_id, to_account_id, amount_cents)?;
    transfer_service::ensure_accounts_exist(&mut *conn, from_account_id, to_account_id).await?;

    // A date in the past can never come due; omitted means immediately due
    let today = Utc::now().date_naive();
    if let Some(date) = scheduled_date {
        if date < today {
            return Err(AppError::InvalidScheduledDate);
        }
    }
    let scheduled_date = scheduled_date.unwrap_or(today);

    let payment = sqlx::query_as::<_, ScheduledPayment>(
        r#"
        INSERT INTO scheduled_payments
            (id, from_account_id, to_account_id, amount_cents, scheduled_date, is_recurring, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(from_account_id)
    .bind(to_account_id)
    .bind(amount_cents)
    .bind(scheduled_date)
    .bind(is_recurring)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    Ok(payment)
}

/// Run a single due scheduled payment.
///
/// # Process
///
/// 1. Start a database transaction
/// 2. Execute the transfer via the transfer engine
/// 3. Set the fulfillment reference, guarded by `transfer_id IS NULL`
///    (if another run got there first, roll everything back - including
///    the transfer from step 2)
/// 4. If recurring, enroll the next payment one calendar month after the
///    original scheduled date
/// 5. Commit
///
/// # Errors
///
/// - `InsufficientFunds`: Propagated from the transfer engine; the
///   schedule remains pending and is retryable on a later run
/// - Any other transfer/scheduling error: propagated unchanged; these
///   indicate a programming or data-integrity fault
pub async fn run_scheduled_payment(
    pool: &DbPool,
    schedule: &ScheduledPayment,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let transfer = match transfer_service::transfer_in_tx(
        &mut tx,
        schedule.from_account_id,
        schedule.to_account_id,
        schedule.amount_cents,
    )
    .await
    {
        Ok(transfer) => transfer,
        Err(err) => {
            tx.rollback().await?;
            return Err(err);
        }
    };

    // Fulfillment is one-way: only an unfulfilled row can be claimed.
    let claimed = sqlx::query(
        "UPDATE scheduled_payments SET transfer_id = ? WHERE id = ? AND transfer_id IS NULL",
    )
    .bind(transfer.id)
    .bind(schedule.id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if claimed == 0 {
        // A concurrent run already fulfilled this schedule. Rolling back
        // discards our transfer, so no duplicate movement is committed.
        tracing::debug!(schedule_id = %schedule.id, "schedule already fulfilled, skipping");
        tx.rollback().await?;
        return Ok(());
    }

    // Recurring payments enroll the next cycle in the same transaction,
    // dated one calendar month after the original scheduled date.
    if schedule.is_recurring {
        let next_date = next_scheduled_date(schedule.scheduled_date)
            .ok_or(AppError::InvalidScheduledDate)?;

        if let Err(err) = schedule_on_conn(
            &mut *tx,
            schedule.from_account_id,
            schedule.to_account_id,
            schedule.amount_cents,
            Some(next_date),
            schedule.is_recurring,
        )
        .await
        {
            tx.rollback().await?;
            return Err(err);
        }
    }

    tx.commit().await?;

    Ok(())
}

/// Process every pending scheduled payment that is due.
///
/// This is the periodic-trigger entry point, invoked by the batch binary
/// or the run endpoint (typically once daily, from cron).
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `include_overdue` - Select payments dated on or before today instead
///   of only those due exactly today
///
/// # Error Policy
///
/// `InsufficientFunds` is the one expected business condition here: the
/// affected schedule is logged, counted as skipped, and left pending so a
/// later run retries it naturally. Every other error aborts the batch and
/// propagates to the caller - invalid data reaching this stage is an
/// integrity fault to surface, not to guess-recover from.
pub async fn process_due(pool: &DbPool, include_overdue: bool) -> Result<DueRunSummary, AppError> {
    let today = Utc::now().date_naive();

    let due: Vec<ScheduledPayment> = if include_overdue {
        sqlx::query_as(
            "SELECT * FROM scheduled_payments WHERE transfer_id IS NULL AND scheduled_date <= ?",
        )
        .bind(today)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as(
            "SELECT * FROM scheduled_payments WHERE transfer_id IS NULL AND scheduled_date = ?",
        )
        .bind(today)
        .fetch_all(pool)
        .await?
    };

    let mut summary = DueRunSummary {
        executed: 0,
        skipped: 0,
    };

    for schedule in &due {
        match run_scheduled_payment(pool, schedule).await {
            Ok(()) => summary.executed += 1,
            Err(AppError::InsufficientFunds) => {
                // Underfunded schedules must not block the rest of the batch
                tracing::warn!(
                    schedule_id = %schedule.id,
                    from_account_id = %schedule.from_account_id,
                    amount_cents = schedule.amount_cents,
                    "skipping scheduled payment: insufficient funds"
                );
                summary.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(summary)
}

/// The next cycle's due date: exactly one calendar month later, same
/// day-of-month, clamped to the last day of shorter months (Jan 31 ->
/// Feb 28, or Feb 29 in leap years).
///
/// `None` only on date overflow, far beyond any representable schedule.
fn next_scheduled_date(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(1))
}
