use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::system_setting::SystemSetting;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<SystemSetting>>>, ApiError> {
    let settings = SystemSetting::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(settings)))
}

pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<ResponseJson<ApiResponse<SystemSetting>>, ApiError> {
    let setting = SystemSetting::find_by_key(state.pool(), &key)
        .await?
        .ok_or(ApiError::NotFound("setting"))?;
    Ok(ResponseJson(ApiResponse::success(setting)))
}

/// Settings are write-by-key: a PUT either creates the key or replaces its
/// whole value document.
pub async fn put_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<serde_json::Value>,
) -> Result<ResponseJson<ApiResponse<SystemSetting>>, ApiError> {
    let setting = SystemSetting::upsert(state.pool(), &key, value).await?;
    Ok(ResponseJson(ApiResponse::success(setting)))
}

pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = SystemSetting::delete(state.pool(), &key).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("setting"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings)).route(
        "/settings/{key}",
        get(get_setting).put(put_setting).delete(delete_setting),
    )
}
