//! Scheduled payment data models and API request/response types.
//!
//! This module defines:
//! - `ScheduledPayment`: Database entity for a pending/fulfilled instruction
//! - `SchedulePaymentRequest`: Request body for scheduling a payment
//! - `ScheduledPaymentResponse`: Response body returned to clients
//! - `RunDueParams`: Query parameters for the batch trigger endpoint

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a scheduled payment record from the database.
///
/// # Lifecycle
///
/// A scheduled payment is created pending (`transfer_id` unset). When the
/// scheduler executes it, `transfer_id` is set to the transfer that
/// fulfilled it, exactly once, never to be cleared again. If the payment
/// is recurring, fulfillment also enrolls a new pending payment one
/// calendar month after the original scheduled date.
///
/// A fulfilled scheduled payment is never re-processed: the due-payment
/// selection query only considers rows where `transfer_id IS NULL`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ScheduledPayment {
    /// Unique identifier for this scheduled payment
    pub id: Uuid,

    /// Account the funds will be taken from
    pub from_account_id: Uuid,

    /// Account the funds will be credited to
    pub to_account_id: Uuid,

    /// Amount in cents
    ///
    /// Must be positive (enforced by CHECK constraint)
    pub amount_cents: i64,

    /// Date on which the payment becomes due
    pub scheduled_date: NaiveDate,

    /// Whether fulfillment re-enrolls the payment for the next month
    pub is_recurring: bool,

    /// Fulfillment reference: the transfer that executed this payment
    ///
    /// NULL while the payment is pending. Set exactly once by the
    /// scheduler; the API never accepts it as input.
    pub transfer_id: Option<Uuid>,

    /// When the scheduled payment was created
    pub created_at: DateTime<Utc>,
}

impl ScheduledPayment {
    /// Whether this payment has been fulfilled by a transfer.
    pub fn is_paid(&self) -> bool {
        self.transfer_id.is_some()
    }
}

/// Request to schedule a payment.
///
/// # JSON Example
///
/// ```json
/// {
///   "from_account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "to_account_id": "660e8400-e29b-41d4-a716-446655440001",
///   "amount_cents": 10000,
///   "scheduled_date": "2026-02-01",
///   "is_recurring": true
/// }
/// ```
///
/// # Validation
///
/// - Same account/amount rules as a direct transfer
/// - `scheduled_date`: Optional; defaults to today (immediately due);
///   must not be in the past
/// - `is_recurring`: Optional, defaults to true
///
/// Note there is no `transfer_id` field: the fulfillment reference is
/// read-only and only ever written by the scheduler.
#[derive(Debug, Deserialize)]
pub struct SchedulePaymentRequest {
    /// Account to pay from
    pub from_account_id: Uuid,

    /// Account to pay to
    pub to_account_id: Uuid,

    /// Amount to pay in cents
    pub amount_cents: i64,

    /// Due date (defaults to today if not provided)
    pub scheduled_date: Option<NaiveDate>,

    /// Whether to re-enroll monthly (defaults to true)
    #[serde(default = "default_recurring")]
    pub is_recurring: bool,
}

/// Default recurrence when not specified in the request.
fn default_recurring() -> bool {
    true
}

/// Query parameters for the due-payment batch trigger.
///
/// `?include_overdue=true` processes every pending payment dated on or
/// before today instead of only those due exactly today.
#[derive(Debug, Deserialize)]
pub struct RunDueParams {
    #[serde(default)]
    pub include_overdue: bool,
}

/// Response body for scheduled payment endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "880e8400-e29b-41d4-a716-446655440003",
///   "from_account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "to_account_id": "660e8400-e29b-41d4-a716-446655440001",
///   "amount_cents": 10000,
///   "scheduled_date": "2026-02-01",
///   "is_recurring": true,
///   "transfer_id": null,
///   "is_paid": false,
///   "created_at": "2026-01-05T16:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ScheduledPaymentResponse {
    pub id: Uuid,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount_cents: i64,
    pub scheduled_date: NaiveDate,
    pub is_recurring: bool,

    /// Fulfillment reference (read-only)
    pub transfer_id: Option<Uuid>,

    /// Derived from the fulfillment reference
    pub is_paid: bool,

    pub created_at: DateTime<Utc>,
}

impl From<ScheduledPayment> for ScheduledPaymentResponse {
    fn from(payment: ScheduledPayment) -> Self {
        let is_paid = payment.is_paid();
        Self {
            id: payment.id,
            from_account_id: payment.from_account_id,
            to_account_id: payment.to_account_id,
            amount_cents: payment.amount_cents,
            scheduled_date: payment.scheduled_date,
            is_recurring: payment.is_recurring,
            transfer_id: payment.transfer_id,
            is_paid,
            created_at: payment.created_at,
        }
    }
}
