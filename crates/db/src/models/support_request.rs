use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "support_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SupportStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "priority_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SupportRequest {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub client_id: Uuid,
    pub subject: String,
    pub description: String,
    pub status: SupportStatus,
    pub priority: PriorityLevel,
    pub attachment_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSupportRequest {
    pub project_id: Option<Uuid>,
    pub client_id: Uuid,
    pub subject: String,
    pub description: String,
    pub priority: Option<PriorityLevel>,
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSupportRequest {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<SupportStatus>,
    pub priority: Option<PriorityLevel>,
    pub attachment_url: Option<String>,
}

impl SupportRequest {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM support_requests ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_client_id(
        pool: &SqlitePool,
        client_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM support_requests WHERE client_id = $1 ORDER BY created_at DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM support_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateSupportRequest,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO support_requests (id, project_id, client_id, subject, description,
                                             status, priority, attachment_url, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.project_id)
        .bind(data.client_id)
        .bind(&data.subject)
        .bind(&data.description)
        .bind(SupportStatus::Open)
        .bind(data.priority.clone().unwrap_or_default())
        .bind(&data.attachment_url)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateSupportRequest,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let request = sqlx::query_as::<_, Self>(
            r#"UPDATE support_requests
               SET subject = $2, description = $3, status = $4, priority = $5,
                   attachment_url = $6, updated_at = $7
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.subject.clone().unwrap_or(existing.subject))
        .bind(data.description.clone().unwrap_or(existing.description))
        .bind(data.status.clone().unwrap_or(existing.status))
        .bind(data.priority.clone().unwrap_or(existing.priority))
        .bind(data.attachment_url.clone().or(existing.attachment_url))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(request))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM support_requests WHERE id = $1")
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

    #[tokio::test]
    async fn create_opens_ticket_with_default_priority() {
        let pool = test_support::new_pool().await;
        let ticket = SupportRequest::create(
            &pool,
            &CreateSupportRequest {
                project_id: None,
                client_id: Uuid::new_v4(),
                subject: "Login broken".to_string(),
                description: "500 on sign-in".to_string(),
                priority: None,
                attachment_url: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(ticket.status, SupportStatus::Open);
        assert_eq!(ticket.priority, PriorityLevel::Medium);
        assert_eq!(ticket.created_at, ticket.updated_at);
    }

    #[tokio::test]
    async fn status_update_keeps_subject_and_priority() {
        let pool = test_support::new_pool().await;
        let ticket = SupportRequest::create(
            &pool,
            &CreateSupportRequest {
                project_id: None,
                client_id: Uuid::new_v4(),
                subject: "Login broken".to_string(),
                description: "500 on sign-in".to_string(),
                priority: Some(PriorityLevel::High),
                attachment_url: None,
            },
        )
        .await
        .unwrap();

        let resolved = SupportRequest::update(
            &pool,
            ticket.id,
            &UpdateSupportRequest {
                status: Some(SupportStatus::Resolved),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(resolved.status, SupportStatus::Resolved);
        assert_eq!(resolved.subject, "Login broken");
        assert_eq!(resolved.priority, PriorityLevel::High);
    }
}
