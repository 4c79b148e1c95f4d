//! Scheduled payment HTTP handlers.
//!
//! This module implements the scheduled-payment API endpoints:
//! - POST /api/v1/scheduled-payments - Schedule a payment
//! - GET /api/v1/scheduled-payments - List scheduled payments
//! - GET /api/v1/scheduled-payments/:id - Get scheduled payment details
//! - POST /api/v1/scheduled-payments/run - Process all due payments
//!
//! The fulfillment reference (`transfer_id`) is read-only: it appears in
//! responses but is never accepted as input, and only the scheduler sets
//! it.

use crate::{
    db::DbPool,
    error::AppError,
    models::scheduled_payment::{
        RunDueParams, ScheduledPayment, ScheduledPaymentResponse, SchedulePaymentRequest,
    },
    services::scheduler_service::{self, DueRunSummary},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

/// Schedule a payment.
///
/// # Endpoint
///
/// `POST /api/v1/scheduled-payments`
///
/// # Request Body
///
/// ```json
/// {
///   "from_account_id": "550e8400-...",
///   "to_account_id": "660e8400-...",
///   "amount_cents": 10000,
///   "scheduled_date": "2026-02-01",
///   "is_recurring": true
/// }
/// ```
///
/// Omitting `scheduled_date` schedules the payment for today (picked up
/// by the next batch run). Omitting `is_recurring` defaults to true.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the pending scheduled payment
/// - **Error (400)**: Invalid accounts, non-positive amount, or a date in
///   the past
pub async fn create_scheduled_payment(
    State(pool): State<DbPool>,
    Json(request): Json<SchedulePaymentRequest>,
) -> Result<Json<ScheduledPaymentResponse>, AppError> {
    let payment = scheduler_service::schedule_payment(
        &pool,
        request.from_account_id,
        request.to_account_id,
        request.amount_cents,
        request.scheduled_date,
        request.is_recurring,
    )
    .await?;

    Ok(Json(payment.into()))
}

/// List all scheduled payments, newest first.
///
/// Both pending and fulfilled payments are returned; `is_paid`
/// distinguishes them.
pub async fn list_scheduled_payments(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<ScheduledPaymentResponse>>, AppError> {
    let payments = sqlx::query_as::<_, ScheduledPayment>(
        "SELECT * FROM scheduled_payments ORDER BY created_at DESC",
    )
    .fetch_all(&pool)
    .await?;

    let responses: Vec<ScheduledPaymentResponse> = payments.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get a specific scheduled payment by ID.
///
/// # Response
///
/// - **Success (200 OK)**: Returns scheduled payment details, including
///   the fulfillment reference once the payment has run
/// - **Error (404)**: Scheduled payment not found
pub async fn get_scheduled_payment(
    State(pool): State<DbPool>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<ScheduledPaymentResponse>, AppError> {
    let payment =
        sqlx::query_as::<_, ScheduledPayment>("SELECT * FROM scheduled_payments WHERE id = ?")
            .bind(payment_id)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::ScheduledPaymentNotFound)?;

    Ok(Json(payment.into()))
}

/// Process all due scheduled payments.
///
/// # Endpoint
///
/// `POST /api/v1/scheduled-payments/run?include_overdue=true`
///
/// This is the trigger entry point for an external periodic caller (e.g.
/// cron hitting the service once a day). With `include_overdue` the run
/// also picks up pending payments whose date has already passed.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "executed": 3,
///   "skipped": 1
/// }
/// ```
///
/// Underfunded schedules are skipped (they stay pending and retry on the
/// next run); any other failure aborts the batch with an error response.
pub async fn run_due_payments(
    State(pool): State<DbPool>,
    Query(params): Query<RunDueParams>,
) -> Result<Json<DueRunSummary>, AppError> {
    let summary = scheduler_service::process_due(&pool, params.include_overdue).await?;

    tracing::info!(
        executed = summary.executed,
        skipped = summary.skipped,
        include_overdue = params.include_overdue,
        "scheduled payment run complete"
    );

    Ok(Json(summary))
}
