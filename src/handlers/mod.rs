//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (database queries, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Account management endpoints
pub mod accounts;
/// Customer management endpoints
pub mod customers;
/// Service health endpoint
pub mod health;
/// Scheduled payment endpoints and batch trigger
pub mod scheduled_payments;
/// Transfer endpoints
pub mod transfers;
