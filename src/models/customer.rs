//! Customer data models and API request/response types.
//!
//! This module defines:
//! - `Customer`: Database entity representing an account owner
//! - `CreateCustomerRequest` / `UpdateCustomerRequest`: Request bodies
//! - `CustomerResponse`: Response body returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a customer record from the database.
///
/// # Database Table
///
/// Maps to the `customers` table. A customer owns zero or more accounts;
/// deleting a customer deletes all of their accounts (and, transitively,
/// the transfers those accounts appear in).
///
/// Customers are not otherwise involved in transfer logic.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Customer {
    /// Unique identifier for this customer
    pub id: Uuid,

    /// Contact email address
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Optional default account for this customer
    ///
    /// This is a weak reference: if the referenced account is deleted,
    /// the database sets this back to NULL rather than deleting the
    /// customer.
    pub default_account_id: Option<Uuid>,

    /// Timestamp when the customer was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new customer.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "full_name": "Jane Doe"
/// }
/// ```
///
/// The default account reference starts out unset; it can be assigned
/// later via `PUT /api/v1/customers/{id}` once an account exists.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    /// Contact email address
    pub email: String,

    /// Display name
    pub full_name: String,
}

/// Request body for updating a customer (full replacement).
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "full_name": "Jane A. Doe",
///   "default_account_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// Omitting `default_account_id` clears the reference.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub email: String,

    pub full_name: String,

    /// New default account, or none to clear it
    #[serde(default)]
    pub default_account_id: Option<Uuid>,
}

/// Response body for customer endpoints.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    /// Customer unique identifier
    pub id: Uuid,

    /// Contact email address
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Default account reference, if set
    pub default_account_id: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            email: customer.email,
            full_name: customer.full_name,
            default_account_id: customer.default_account_id,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}
