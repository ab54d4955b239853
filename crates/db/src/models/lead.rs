use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Pipeline stage of a sales lead. The variant order is the kanban
/// column order.
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Default,
)]
#[sqlx(type_name = "lead_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl LeadStatus {
    /// All pipeline stages in kanban order.
    pub fn stages() -> Vec<LeadStatus> {
        LeadStatus::iter().collect()
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub status: LeadStatus,
    pub potential_value: Option<f64>,
    pub probability: Option<i32>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub follow_up_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub status: Option<LeadStatus>,
    pub potential_value: Option<f64>,
    pub probability: Option<i32>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub follow_up_notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub status: Option<LeadStatus>,
    pub potential_value: Option<f64>,
    pub probability: Option<i32>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub follow_up_notes: Option<String>,
}

impl Lead {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM leads ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateLead) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO leads (id, name, email, phone, company, source, notes, status,
                                  potential_value, probability, next_follow_up, follow_up_notes,
                                  created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
               RETURNING *"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.company)
        .bind(&data.source)
        .bind(&data.notes)
        .bind(data.status.clone().unwrap_or_default())
        .bind(data.potential_value)
        .bind(data.probability)
        .bind(data.next_follow_up)
        .bind(&data.follow_up_notes)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateLead,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let lead = sqlx::query_as::<_, Self>(
            r#"UPDATE leads
               SET name = $2, email = $3, phone = $4, company = $5, source = $6, notes = $7,
                   status = $8, potential_value = $9, probability = $10, next_follow_up = $11,
                   follow_up_notes = $12, updated_at = $13
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.name.clone().unwrap_or(existing.name))
        .bind(data.email.clone().unwrap_or(existing.email))
        .bind(data.phone.clone().or(existing.phone))
        .bind(data.company.clone().or(existing.company))
        .bind(data.source.clone().or(existing.source))
        .bind(data.notes.clone().or(existing.notes))
        .bind(data.status.clone().unwrap_or(existing.status))
        .bind(data.potential_value.or(existing.potential_value))
        .bind(data.probability.or(existing.probability))
        .bind(data.next_follow_up.or(existing.next_follow_up))
        .bind(data.follow_up_notes.clone().or(existing.follow_up_notes))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(lead))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
