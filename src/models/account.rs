//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity representing a ledger account
//! - `CreateAccountRequest`: Request body for creating accounts
//! - `AccountResponse`: Response body returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. Each account:
/// - Belongs to one customer (via `customer_id`)
/// - Carries a unique, human-facing account number
/// - Has a balance stored in cents (to avoid floating-point errors)
///
/// # Balance Storage
///
/// Balances are stored as `i64` cents to avoid floating-point precision issues.
///
/// For example:
/// - $10.50 is stored as 1050 cents
/// - $100.00 is stored as 10000 cents
///
/// The balance is mutated only by the transfer engine's atomic debit/credit
/// updates; the database CHECK constraint keeps it non-negative after any
/// committed operation.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Account {
    /// Unique identifier for this account
    pub id: Uuid,

    /// Unique, positive account number
    pub number: i64,

    /// Foreign key to the customer that owns this account
    ///
    /// Deleting the customer deletes the account.
    pub customer_id: Uuid,

    /// Current balance in cents (not dollars)
    ///
    /// Must be >= 0 (enforced by database CHECK constraint).
    /// Using i64 allows balances up to ~92 quadrillion dollars.
    pub balance_cents: i64,

    /// Timestamp when account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of last balance update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "number": 123,
///   "customer_id": "550e8400-e29b-41d4-a716-446655440000",
///   "initial_balance_cents": 10000
/// }
/// ```
///
/// # Validation
///
/// - `number`: Required, positive, unique across all accounts
/// - `customer_id`: Required, must reference an existing customer
/// - `initial_balance_cents`: Optional, defaults to 0, must not be negative
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account number for the new account
    pub number: i64,

    /// Owning customer
    pub customer_id: Uuid,

    /// Initial balance in cents (defaults to 0 if not provided)
    #[serde(default)]
    pub initial_balance_cents: i64,
}

/// Response body for account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "number": 123,
///   "customer_id": "660e8400-e29b-41d4-a716-446655440001",
///   "balance_cents": 100000,
///   "created_at": "2026-01-05T10:00:00Z",
///   "updated_at": "2026-01-05T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account unique identifier
    pub id: Uuid,

    /// Account number
    pub number: i64,

    /// Owning customer
    pub customer_id: Uuid,

    /// Current balance in cents
    pub balance_cents: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            number: account.number,
            customer_id: account.customer_id,
            balance_cents: account.balance_cents,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
