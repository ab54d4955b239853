use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Selects the email template used when a notification is dispatched.
#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display)]
#[sqlx(type_name = "notification_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationType {
    Project,
    Payment,
    Support,
    Meeting,
    System,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub link: Option<String>,
}

impl Notification {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateNotification,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO notifications (id, user_id, title, message, type, link, read, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8)
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.notification_type.clone())
        .bind(&data.link)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn mark_read(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"UPDATE notifications
               SET read = 1, updated_at = $2
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await
    }

    pub async fn unread_count(pool: &SqlitePool, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = 0")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn note_for(user_id: Uuid) -> CreateNotification {
        CreateNotification {
            user_id,
            title: "Invoice Paid".to_string(),
            message: "Invoice INV-001 has been marked as paid.".to_string(),
            notification_type: NotificationType::Payment,
            link: Some("/invoices".to_string()),
        }
    }

    #[tokio::test]
    async fn new_notifications_start_unread() {
        let pool = test_support::new_pool().await;
        let user_id = Uuid::new_v4();

        let created = Notification::create(&pool, &note_for(user_id)).await.unwrap();
        assert!(!created.read);
        assert_eq!(Notification::unread_count(&pool, user_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn mark_read_clears_unread_count() {
        let pool = test_support::new_pool().await;
        let user_id = Uuid::new_v4();
        let created = Notification::create(&pool, &note_for(user_id)).await.unwrap();

        let updated = Notification::mark_read(&pool, created.id).await.unwrap().unwrap();
        assert!(updated.read);
        assert_eq!(Notification::unread_count(&pool, user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn find_by_user_id_is_scoped_to_the_user() {
        let pool = test_support::new_pool().await;
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        Notification::create(&pool, &note_for(a)).await.unwrap();
        Notification::create(&pool, &note_for(b)).await.unwrap();

        let for_a = Notification::find_by_user_id(&pool, a).await.unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].user_id, a);
    }
}
