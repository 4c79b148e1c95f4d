//! Customer management HTTP handlers.
//!
//! This module implements the customer-related API endpoints:
//! - POST /api/v1/customers - Create new customer
//! - GET /api/v1/customers - List all customers
//! - GET /api/v1/customers/:id - Get customer by ID
//! - PUT /api/v1/customers/:id - Update customer (may set/clear default account)
//! - DELETE /api/v1/customers/:id - Delete customer and their accounts

use crate::{
    db::DbPool,
    error::AppError,
    models::customer::{CreateCustomerRequest, Customer, CustomerResponse, UpdateCustomerRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

/// Create a new customer.
///
/// # Endpoint
///
/// `POST /api/v1/customers`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "full_name": "Jane Doe"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the created customer
/// - **Error (500)**: Database error
pub async fn create_customer(
    State(pool): State<DbPool>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    let now = Utc::now();
    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (id, email, full_name, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.email)
    .bind(request.full_name)
    .bind(now)
    .bind(now)
    .fetch_one(&pool)
    .await?;

    Ok(Json(customer.into()))
}

/// List all customers, newest first.
pub async fn list_customers(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customers =
        sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY created_at DESC")
            .fetch_all(&pool)
            .await?;

    let responses: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get a specific customer by ID.
///
/// # Response
///
/// - **Success (200 OK)**: Returns customer details
/// - **Error (404)**: Customer not found
pub async fn get_customer(
    State(pool): State<DbPool>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
        .bind(customer_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::CustomerNotFound)?;

    Ok(Json(customer.into()))
}

/// Update a customer (full replacement).
///
/// # Endpoint
///
/// `PUT /api/v1/customers/:id`
///
/// The default account reference may be set to any existing account or
/// cleared by omitting it. This is the only writable link between a
/// customer and the ledger side of the data model.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the updated customer
/// - **Error (404)**: Customer not found, or referenced account not found
pub async fn update_customer(
    State(pool): State<DbPool>,
    Path(customer_id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    // The new default account must exist before we point at it
    if let Some(account_id) = request.default_account_id {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = ?)")
            .bind(account_id)
            .fetch_one(&pool)
            .await?;
        if !exists {
            return Err(AppError::AccountNotFound);
        }
    }

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        UPDATE customers
        SET email = ?, full_name = ?, default_account_id = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(request.email)
    .bind(request.full_name)
    .bind(request.default_account_id)
    .bind(Utc::now())
    .bind(customer_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::CustomerNotFound)?;

    Ok(Json(customer.into()))
}

/// Delete a customer.
///
/// Deleting a customer cascades to their accounts, which in turn cascades
/// to the transfers and scheduled payments those accounts appear in.
///
/// # Response
///
/// - **Success (204 No Content)**
/// - **Error (404)**: Customer not found
pub async fn delete_customer(
    State(pool): State<DbPool>,
    Path(customer_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM customers WHERE id = ?")
        .bind(customer_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::CustomerNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
