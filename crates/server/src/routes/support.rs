use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::support_request::{CreateSupportRequest, SupportRequest, UpdateSupportRequest};
use serde::Deserialize;
use services::services::support::SupportService;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SupportFilter {
    pub client_id: Option<Uuid>,
}

pub async fn get_support_requests(
    State(state): State<AppState>,
    Query(filter): Query<SupportFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<SupportRequest>>>, ApiError> {
    let requests = match filter.client_id {
        Some(client_id) => SupportRequest::find_by_client_id(state.pool(), client_id).await?,
        None => SupportRequest::find_all(state.pool()).await?,
    };
    Ok(ResponseJson(ApiResponse::success(requests)))
}

pub async fn get_support_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<SupportRequest>>, ApiError> {
    let request = SupportRequest::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("support request"))?;
    Ok(ResponseJson(ApiResponse::success(request)))
}

pub async fn create_support_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupportRequest>,
) -> Result<ResponseJson<ApiResponse<SupportRequest>>, ApiError> {
    let request = SupportService::create(state.pool(), &state.notifier, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(request)))
}

pub async fn update_support_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupportRequest>,
) -> Result<ResponseJson<ApiResponse<SupportRequest>>, ApiError> {
    let request = SupportService::update(state.pool(), &state.notifier, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("support request"))?;
    Ok(ResponseJson(ApiResponse::success(request)))
}

pub async fn delete_support_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = SupportRequest::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("support request"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/support-requests",
            get(get_support_requests).post(create_support_request),
        )
        .route(
            "/support-requests/{id}",
            get(get_support_request)
                .put(update_support_request)
                .delete(delete_support_request),
        )
}
