use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::user::{CreateUser, UpdateUser, User};
use services::services::users::UserService;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn get_users(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<User>>>, ApiError> {
    let users = User::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(users)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<User>>, ApiError> {
    let user = User::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(ResponseJson(ApiResponse::success(user)))
}

/// Registration persists the user, notifies the admin team and sends the
/// welcome email.
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<ResponseJson<ApiResponse<User>>, ApiError> {
    if User::find_by_email(state.pool(), &payload.email).await?.is_some() {
        return Err(ApiError::BadRequest(format!(
            "a user with email {} already exists",
            payload.email
        )));
    }
    let user = UserService::register(state.pool(), &state.notifier, &state.email, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUser>,
) -> Result<ResponseJson<ApiResponse<User>>, ApiError> {
    let user = User::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(ResponseJson(ApiResponse::success(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = User::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("user"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users).post(register_user))
        .route(
            "/users/{id}",
            put(update_user).get(get_user).delete(delete_user),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let state = test_state().await;
        let payload = CreateUser {
            email: "dupe@example.com".to_string(),
            full_name: "First".to_string(),
            role: None,
            avatar_url: None,
        };

        register_user(State(state.clone()), Json(payload.clone()))
            .await
            .unwrap();
        let second = register_user(State(state), Json(payload)).await;
        assert!(matches!(second, Err(ApiError::BadRequest(_))));
    }
}
