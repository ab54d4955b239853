use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "planning_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlanningCategory {
    #[default]
    Idea,
    Strategy,
    Todo,
    Other,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlanningNote {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: PlanningCategory,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanningNote {
    pub title: String,
    pub content: String,
    pub category: Option<PlanningCategory>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlanningNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<PlanningCategory>,
}

impl PlanningNote {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM planning_notes ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM planning_notes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreatePlanningNote) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO planning_notes (id, title, content, category, created_by, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.category.clone().unwrap_or_default())
        .bind(data.created_by)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdatePlanningNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let note = sqlx::query_as::<_, Self>(
            r#"UPDATE planning_notes
               SET title = $2, content = $3, category = $4, updated_at = $5
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.title.clone().unwrap_or(existing.title))
        .bind(data.content.clone().unwrap_or(existing.content))
        .bind(data.category.clone().unwrap_or(existing.category))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(note))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM planning_notes WHERE id = $1")
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
    async fn delete_removes_the_note() {
        let pool = test_support::new_pool().await;
        let note = PlanningNote::create(
            &pool,
            &CreatePlanningNote {
                title: "Q3 focus".to_string(),
                content: "Double down on retainer clients".to_string(),
                category: Some(PlanningCategory::Strategy),
                created_by: Uuid::new_v4(),
            },
        )
        .await
        .unwrap();

        assert_eq!(PlanningNote::delete(&pool, note.id).await.unwrap(), 1);
        assert!(PlanningNote::find_by_id(&pool, note.id).await.unwrap().is_none());
    }
}
