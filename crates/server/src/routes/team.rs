use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn get_team_members(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<TeamMember>>>, ApiError> {
    let members = TeamMember::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(members)))
}

pub async fn get_team_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<TeamMember>>, ApiError> {
    let member = TeamMember::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("team member"))?;
    Ok(ResponseJson(ApiResponse::success(member)))
}

pub async fn create_team_member(
    State(state): State<AppState>,
    Json(payload): Json<CreateTeamMember>,
) -> Result<ResponseJson<ApiResponse<TeamMember>>, ApiError> {
    let member = TeamMember::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(member)))
}

pub async fn update_team_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTeamMember>,
) -> Result<ResponseJson<ApiResponse<TeamMember>>, ApiError> {
    let member = TeamMember::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("team member"))?;
    Ok(ResponseJson(ApiResponse::success(member)))
}

pub async fn delete_team_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = TeamMember::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("team member"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/team", get(get_team_members).post(create_team_member))
        .route(
            "/team/{id}",
            get(get_team_member)
                .put(update_team_member)
                .delete(delete_team_member),
        )
}
