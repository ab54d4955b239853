use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, types::Json};
use uuid::Uuid;

/// Key/value settings bag, one JSON document per key.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SystemSetting {
    pub id: Uuid,
    pub key: String,
    pub value: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SystemSetting {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM system_settings ORDER BY key ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_key(pool: &SqlitePool, key: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM system_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    pub async fn upsert(
        pool: &SqlitePool,
        key: &str,
        value: serde_json::Value,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO system_settings (id, key, value, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = excluded.updated_at
               RETURNING *"#,
        )
        .bind(id)
        .bind(key)
        .bind(Json(value))
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, key: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM system_settings WHERE key = $1")
            .bind(key)
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
    async fn upsert_replaces_value_for_existing_key() {
        let pool = test_support::new_pool().await;
        SystemSetting::upsert(&pool, "billing", serde_json::json!({"tax": 0.0}))
            .await
            .unwrap();
        SystemSetting::upsert(&pool, "billing", serde_json::json!({"tax": 0.21}))
            .await
            .unwrap();

        let all = SystemSetting::find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        let setting = SystemSetting::find_by_key(&pool, "billing").await.unwrap().unwrap();
        assert_eq!(setting.value.0["tax"], 0.21);
    }
}
