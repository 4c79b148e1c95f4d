//! HTTP router construction.
//!
//! Shared between the server binary and the HTTP-level tests so both run
//! exactly the same routes and middleware.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{db::DbPool, handlers};

/// Build the application router.
///
/// # Routes
///
/// - Customer management: read/write
/// - Account management: read/write (balances excluded - those move only
///   through transfers)
/// - Transfers: create + read-only record view (no update/delete routes)
/// - Scheduled payments: create, read, and the due-payment batch trigger
pub fn build_router(pool: DbPool) -> Router {
    Router::new()
        // Public health endpoint
        .route("/health", get(handlers::health::health_check))
        // Customer management routes
        .route("/api/v1/customers", post(handlers::customers::create_customer))
        .route("/api/v1/customers", get(handlers::customers::list_customers))
        .route(
            "/api/v1/customers/{id}",
            get(handlers::customers::get_customer),
        )
        .route(
            "/api/v1/customers/{id}",
            put(handlers::customers::update_customer),
        )
        .route(
            "/api/v1/customers/{id}",
            delete(handlers::customers::delete_customer),
        )
        // Account management routes
        .route("/api/v1/accounts", post(handlers::accounts::create_account))
        .route("/api/v1/accounts", get(handlers::accounts::list_accounts))
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account),
        )
        .route(
            "/api/v1/accounts/{id}",
            delete(handlers::accounts::delete_account),
        )
        // Transfer routes (records are immutable: no update/delete)
        .route("/api/v1/transfers", post(handlers::transfers::create_transfer))
        .route("/api/v1/transfers", get(handlers::transfers::list_transfers))
        .route(
            "/api/v1/transfers/{id}",
            get(handlers::transfers::get_transfer),
        )
        // Scheduled payment routes
        .route(
            "/api/v1/scheduled-payments",
            post(handlers::scheduled_payments::create_scheduled_payment),
        )
        .route(
            "/api/v1/scheduled-payments",
            get(handlers::scheduled_payments::list_scheduled_payments),
        )
        .route(
            "/api/v1/scheduled-payments/run",
            post(handlers::scheduled_payments::run_due_payments),
        )
        .route(
            "/api/v1/scheduled-payments/{id}",
            get(handlers::scheduled_payments::get_scheduled_payment),
        )
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share database pool with all handlers via State extraction
        .with_state(pool)
}
