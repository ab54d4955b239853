use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "meeting_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MeetingStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Completed,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub client_id: Uuid,
    pub requested_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub purpose: String,
    pub status: MeetingStatus,
    pub meeting_link: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetingRequest {
    pub project_id: Option<Uuid>,
    pub client_id: Uuid,
    pub requested_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub purpose: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMeetingRequest {
    pub requested_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub purpose: Option<String>,
    pub status: Option<MeetingStatus>,
    pub meeting_link: Option<String>,
    pub admin_notes: Option<String>,
}

impl MeetingRequest {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM meeting_requests ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_client_id(
        pool: &SqlitePool,
        client_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM meeting_requests WHERE client_id = $1 ORDER BY created_at DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM meeting_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// New requests always enter the queue as pending.
    pub async fn create(
        pool: &SqlitePool,
        data: &CreateMeetingRequest,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO meeting_requests (id, project_id, client_id, requested_date,
                                             duration_minutes, purpose, status, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.project_id)
        .bind(data.client_id)
        .bind(data.requested_date)
        .bind(data.duration_minutes)
        .bind(&data.purpose)
        .bind(MeetingStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateMeetingRequest,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let meeting = sqlx::query_as::<_, Self>(
            r#"UPDATE meeting_requests
               SET requested_date = $2, duration_minutes = $3, purpose = $4, status = $5,
                   meeting_link = $6, admin_notes = $7, updated_at = $8
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.requested_date.unwrap_or(existing.requested_date))
        .bind(data.duration_minutes.unwrap_or(existing.duration_minutes))
        .bind(data.purpose.clone().unwrap_or(existing.purpose))
        .bind(data.status.clone().unwrap_or(existing.status))
        .bind(data.meeting_link.clone().or(existing.meeting_link))
        .bind(data.admin_notes.clone().or(existing.admin_notes))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(meeting))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meeting_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
