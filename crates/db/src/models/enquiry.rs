use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "enquiry_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EnquiryStatus {
    #[default]
    New,
    Read,
    Replied,
    Converted,
}

/// Inbound website enquiry; may be converted into a [`crate::models::lead::Lead`].
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: EnquiryStatus,
    pub converted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEnquiry {
    pub status: Option<EnquiryStatus>,
    pub converted: Option<bool>,
}

impl Enquiry {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM enquiries ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM enquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateEnquiry) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO enquiries (id, name, email, phone, message, status, converted, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8)
               RETURNING *"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.message)
        .bind(EnquiryStatus::New)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateEnquiry,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let enquiry = sqlx::query_as::<_, Self>(
            r#"UPDATE enquiries
               SET status = $2, converted = $3, updated_at = $4
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.status.clone().unwrap_or(existing.status))
        .bind(data.converted.unwrap_or(existing.converted))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(enquiry))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enquiries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
