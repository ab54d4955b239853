use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::notification::Notification;
use serde::Serialize;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

pub async fn get_user_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = Notification::find_by_user_id(state.pool(), user_id).await?;
    Ok(ResponseJson(ApiResponse::success(notifications)))
}

pub async fn get_unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<UnreadCount>>, ApiError> {
    let unread = Notification::unread_count(state.pool(), user_id).await?;
    Ok(ResponseJson(ApiResponse::success(UnreadCount { unread })))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Notification>>, ApiError> {
    let notification = Notification::mark_read(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("notification"))?;
    Ok(ResponseJson(ApiResponse::success(notification)))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Notification::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("notification"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/notifications", get(get_user_notifications))
        .route(
            "/users/{user_id}/notifications/unread-count",
            get(get_unread_count),
        )
        .route("/notifications/{id}/read", post(mark_notification_read))
        .route(
            "/notifications/{id}",
            axum::routing::delete(delete_notification),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use db::models::notification::{CreateNotification, NotificationType};

    #[tokio::test]
    async fn marking_read_drops_the_unread_count() {
        let state = test_state().await;
        let user_id = Uuid::new_v4();
        let notification = Notification::create(
            state.pool(),
            &CreateNotification {
                user_id,
                title: "Invoice Paid".to_string(),
                message: "Invoice INV-1 was paid.".to_string(),
                notification_type: NotificationType::Payment,
                link: None,
            },
        )
        .await
        .unwrap();

        let before = get_unread_count(State(state.clone()), Path(user_id))
            .await
            .unwrap();
        assert_eq!(before.0.data.unwrap().unread, 1);

        mark_notification_read(State(state.clone()), Path(notification.id))
            .await
            .unwrap();

        let after = get_unread_count(State(state), Path(user_id)).await.unwrap();
        assert_eq!(after.0.data.unwrap().unread, 0);
    }
}
