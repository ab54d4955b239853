use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::meeting_request::{CreateMeetingRequest, MeetingRequest, UpdateMeetingRequest};
use serde::Deserialize;
use services::services::meetings::MeetingService;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct MeetingFilter {
    pub client_id: Option<Uuid>,
}

pub async fn get_meetings(
    State(state): State<AppState>,
    Query(filter): Query<MeetingFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<MeetingRequest>>>, ApiError> {
    let meetings = match filter.client_id {
        Some(client_id) => MeetingRequest::find_by_client_id(state.pool(), client_id).await?,
        None => MeetingRequest::find_all(state.pool()).await?,
    };
    Ok(ResponseJson(ApiResponse::success(meetings)))
}

pub async fn get_meeting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<MeetingRequest>>, ApiError> {
    let meeting = MeetingRequest::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("meeting request"))?;
    Ok(ResponseJson(ApiResponse::success(meeting)))
}

pub async fn create_meeting(
    State(state): State<AppState>,
    Json(payload): Json<CreateMeetingRequest>,
) -> Result<ResponseJson<ApiResponse<MeetingRequest>>, ApiError> {
    let meeting = MeetingService::create(state.pool(), &state.notifier, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(meeting)))
}

pub async fn update_meeting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMeetingRequest>,
) -> Result<ResponseJson<ApiResponse<MeetingRequest>>, ApiError> {
    let meeting = MeetingService::update(state.pool(), &state.notifier, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("meeting request"))?;
    Ok(ResponseJson(ApiResponse::success(meeting)))
}

pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = MeetingRequest::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("meeting request"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meetings", get(get_meetings).post(create_meeting))
        .route(
            "/meetings/{id}",
            get(get_meeting).put(update_meeting).delete(delete_meeting),
        )
}
