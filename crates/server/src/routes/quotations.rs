use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::quotation::{CreateQuotation, Quotation, UpdateQuotation};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn get_quotations(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Quotation>>>, ApiError> {
    let quotations = Quotation::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(quotations)))
}

pub async fn get_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Quotation>>, ApiError> {
    let quotation = Quotation::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("quotation"))?;
    Ok(ResponseJson(ApiResponse::success(quotation)))
}

pub async fn create_quotation(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuotation>,
) -> Result<ResponseJson<ApiResponse<Quotation>>, ApiError> {
    let quotation = Quotation::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(quotation)))
}

pub async fn update_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuotation>,
) -> Result<ResponseJson<ApiResponse<Quotation>>, ApiError> {
    let quotation = Quotation::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("quotation"))?;
    Ok(ResponseJson(ApiResponse::success(quotation)))
}

pub async fn delete_quotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Quotation::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("quotation"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quotations", get(get_quotations).post(create_quotation))
        .route(
            "/quotations/{id}",
            get(get_quotation)
                .put(update_quotation)
                .delete(delete_quotation),
        )
}
