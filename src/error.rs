//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Business Rule Errors**: Transfer/scheduling operations that violate
///   ledger invariants (invalid accounts, non-positive amounts, insufficient
///   funds, past schedule dates)
/// - **Resource Errors**: Requested resources not found
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A transfer or scheduled payment names a missing account, or the
    /// source and destination are the same account.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid source or destination account")]
    InvalidAccounts,

    /// Transfer amount is zero or negative.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Amount must be positive")]
    InvalidAmount,

    /// Requested schedule date lies in the past.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Scheduled date must not be in the past")]
    InvalidScheduledDate,

    /// Source account balance cannot cover the transfer amount.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Requested customer does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Customer not found")]
    CustomerNotFound,

    /// Requested account does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Account not found")]
    AccountNotFound,

    /// Requested transfer record does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Transfer not found")]
    TransferNotFound,

    /// Requested scheduled payment does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Scheduled payment not found")]
    ScheduledPaymentNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidAccounts` / `InvalidAmount` / `InvalidScheduledDate` /
///   `InvalidRequest` → 400 Bad Request
/// - `InsufficientFunds` → 422 Unprocessable Entity
/// - `*NotFound` → 404 Not Found
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::InvalidAccounts => (
                StatusCode::BAD_REQUEST,
                "invalid_accounts",
                self.to_string(),
            ),
            AppError::InvalidAmount => {
                (StatusCode::BAD_REQUEST, "invalid_amount", self.to_string())
            }
            AppError::InvalidScheduledDate => (
                StatusCode::BAD_REQUEST,
                "invalid_scheduled_date",
                self.to_string(),
            ),
            AppError::InsufficientFunds => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_funds",
                self.to_string(),
            ),
            AppError::CustomerNotFound => {
                (StatusCode::NOT_FOUND, "customer_not_found", self.to_string())
            }
            AppError::AccountNotFound => {
                (StatusCode::NOT_FOUND, "account_not_found", self.to_string())
            }
            AppError::TransferNotFound => {
                (StatusCode::NOT_FOUND, "transfer_not_found", self.to_string())
            }
            AppError::ScheduledPaymentNotFound => (
                StatusCode::NOT_FOUND,
                "scheduled_payment_not_found",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
