use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::transaction::{CreateTransaction, Transaction, UpdateTransaction};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn get_transactions(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Transaction>>>, ApiError> {
    let transactions = Transaction::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(transactions)))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Transaction>>, ApiError> {
    let transaction = Transaction::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("transaction"))?;
    Ok(ResponseJson(ApiResponse::success(transaction)))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransaction>,
) -> Result<ResponseJson<ApiResponse<Transaction>>, ApiError> {
    let transaction = Transaction::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(transaction)))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransaction>,
) -> Result<ResponseJson<ApiResponse<Transaction>>, ApiError> {
    let transaction = Transaction::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("transaction"))?;
    Ok(ResponseJson(ApiResponse::success(transaction)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Transaction::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("transaction"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(get_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
