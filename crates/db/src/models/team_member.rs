use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "member_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub monthly_salary: f64,
    pub joined_date: DateTime<Utc>,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
    pub monthly_salary: f64,
    pub joined_date: DateTime<Utc>,
    pub status: Option<MemberStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub monthly_salary: Option<f64>,
    pub joined_date: Option<DateTime<Utc>>,
    pub status: Option<MemberStatus>,
}

impl TeamMember {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM team_members ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM team_members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateTeamMember) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO team_members (id, name, email, role, monthly_salary, joined_date,
                                         status, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.role)
        .bind(data.monthly_salary)
        .bind(data.joined_date)
        .bind(data.status.clone().unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateTeamMember,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let member = sqlx::query_as::<_, Self>(
            r#"UPDATE team_members
               SET name = $2, email = $3, role = $4, monthly_salary = $5, joined_date = $6,
                   status = $7, updated_at = $8
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.name.clone().unwrap_or(existing.name))
        .bind(data.email.clone().unwrap_or(existing.email))
        .bind(data.role.clone().unwrap_or(existing.role))
        .bind(data.monthly_salary.unwrap_or(existing.monthly_salary))
        .bind(data.joined_date.unwrap_or(existing.joined_date))
        .bind(data.status.clone().unwrap_or(existing.status))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(member))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
