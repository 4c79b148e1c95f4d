//! Transfer data models and API request/response types.
//!
//! This module defines:
//! - `Transfer`: Database entity recording a completed balance movement
//! - `TransferRequest`: Request body for executing a transfer
//! - `TransferResponse`: Response body returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a transfer record from the database.
///
/// # Database Table
///
/// Maps to the `transfers` table. Each transfer:
/// - References the source and destination accounts
/// - Stores the amount in cents (never floats!)
/// - Is written exactly once, in the same database transaction as the
///   balance movement it records
///
/// Transfers are immutable: there is no update or delete operation anywhere
/// in the API. Invariants: `amount_cents > 0`, source ≠ destination.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transfer {
    /// Unique identifier for this transfer
    pub id: Uuid,

    /// Account the funds were taken from
    pub from_account_id: Uuid,

    /// Account the funds were credited to
    pub to_account_id: Uuid,

    /// Amount in cents
    ///
    /// Must be positive (enforced by CHECK constraint)
    pub amount_cents: i64,

    /// When the transfer was executed
    pub created_at: DateTime<Utc>,
}

/// Request to transfer money between accounts.
///
/// # JSON Example
///
/// ```json
/// {
///   "from_account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "to_account_id": "660e8400-e29b-41d4-a716-446655440001",
///   "amount_cents": 25000
/// }
/// ```
///
/// # Atomicity Guarantee
///
/// BOTH accounts are updated in the same database transaction as the
/// transfer record insert. Either everything succeeds or nothing does.
///
/// # Validation
///
/// - Both accounts must exist and be different
/// - Amount must be positive
/// - Source must have sufficient balance
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Account to transfer from (will decrease)
    pub from_account_id: Uuid,

    /// Account to transfer to (will increase)
    pub to_account_id: Uuid,

    /// Amount to transfer in cents
    pub amount_cents: i64,
}

/// Response returned for transfer operations.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "from_account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "to_account_id": "660e8400-e29b-41d4-a716-446655440001",
///   "amount_cents": 25000,
///   "created_at": "2026-01-05T16:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub id: Uuid,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Transfer> for TransferResponse {
    fn from(transfer: Transfer) -> Self {
        Self {
            id: transfer.id,
            from_account_id: transfer.from_account_id,
            to_account_id: transfer.to_account_id,
            amount_cents: transfer.amount_cents,
            created_at: transfer.created_at,
        }
    }
}
