use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::planning_note::{CreatePlanningNote, PlanningNote, UpdatePlanningNote};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn get_planning_notes(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<PlanningNote>>>, ApiError> {
    let notes = PlanningNote::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(notes)))
}

pub async fn get_planning_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<PlanningNote>>, ApiError> {
    let note = PlanningNote::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("planning note"))?;
    Ok(ResponseJson(ApiResponse::success(note)))
}

pub async fn create_planning_note(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlanningNote>,
) -> Result<ResponseJson<ApiResponse<PlanningNote>>, ApiError> {
    let note = PlanningNote::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(note)))
}

pub async fn update_planning_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePlanningNote>,
) -> Result<ResponseJson<ApiResponse<PlanningNote>>, ApiError> {
    let note = PlanningNote::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("planning note"))?;
    Ok(ResponseJson(ApiResponse::success(note)))
}

pub async fn delete_planning_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = PlanningNote::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("planning note"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/planning-notes",
            get(get_planning_notes).post(create_planning_note),
        )
        .route(
            "/planning-notes/{id}",
            get(get_planning_note)
                .put(update_planning_note)
                .delete(delete_planning_note),
        )
}
