use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::lead::{CreateLead, Lead, UpdateLead};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn get_leads(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Lead>>>, ApiError> {
    let leads = Lead::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(leads)))
}

pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = Lead::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("lead"))?;
    Ok(ResponseJson(ApiResponse::success(lead)))
}

pub async fn create_lead(
    State(state): State<AppState>,
    Json(payload): Json<CreateLead>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = Lead::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(lead)))
}

pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLead>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = Lead::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("lead"))?;
    Ok(ResponseJson(ApiResponse::success(lead)))
}

pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Lead::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("lead"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/leads", get(get_leads).post(create_lead))
        .route(
            "/leads/{id}",
            get(get_lead).put(update_lead).delete(delete_lead),
        )
}
