//! Transfer HTTP handlers.
//!
//! This module implements the transfer-related API endpoints:
//! - POST /api/v1/transfers - Move money between accounts
//! - GET /api/v1/transfers - List transfer records
//! - GET /api/v1/transfers/:id - Get transfer details
//!
//! Transfers are an append-only record: there are no update or delete
//! routes.

use crate::{
    db::DbPool,
    error::AppError,
    models::transfer::{Transfer, TransferRequest, TransferResponse},
    services::transfer_service,
};
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// Execute a transfer between two accounts.
///
/// # Endpoint
///
/// `POST /api/v1/transfers`
///
/// # Request Body
///
/// ```json
/// {
///   "from_account_id": "550e8400-...",
///   "to_account_id": "660e8400-...",
///   "amount_cents": 25000
/// }
/// ```
///
/// # Atomicity
///
/// Both balances and the transfer record are written in a single database
/// transaction. Either everything succeeds or nothing does.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the created transfer record
/// - **Error (400)**: Same account on both sides, missing account, or
///   non-positive amount
/// - **Error (422)**: Insufficient funds on the source account
pub async fn create_transfer(
    State(pool): State<DbPool>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let transfer = transfer_service::execute_transfer(
        &pool,
        request.from_account_id,
        request.to_account_id,
        request.amount_cents,
    )
    .await?;

    Ok(Json(transfer.into()))
}

/// List all transfers, newest first.
pub async fn list_transfers(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<TransferResponse>>, AppError> {
    let transfers =
        sqlx::query_as::<_, Transfer>("SELECT * FROM transfers ORDER BY created_at DESC")
            .fetch_all(&pool)
            .await?;

    let responses: Vec<TransferResponse> = transfers.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get transfer by ID.
///
/// # Response
///
/// - **Success (200 OK)**: Returns transfer details
/// - **Error (404)**: Transfer not found
pub async fn get_transfer(
    State(pool): State<DbPool>,
    Path(transfer_id): Path<Uuid>,
) -> Result<Json<TransferResponse>, AppError> {
    let transfer = transfer_service::get_transfer_by_id(&pool, transfer_id)
        .await?
        .ok_or(AppError::TransferNotFound)?;

    Ok(Json(transfer.into()))
}
