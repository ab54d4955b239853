use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    #[default]
    Client,
    Admin,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub full_name: String,
    pub role: Option<UserRole>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub avatar_url: Option<String>,
}

impl User {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// All users with the admin role, for notification fan-out.
    pub async fn find_admins(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE role = $1 ORDER BY created_at DESC")
            .bind(UserRole::Admin)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateUser) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO users (id, email, full_name, role, avatar_url, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(id)
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(data.role.clone().unwrap_or_default())
        .bind(&data.avatar_url)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, Self>(
            r#"UPDATE users
               SET email = $2, full_name = $3, role = $4, avatar_url = $5, updated_at = $6
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.email.clone().unwrap_or(existing.email))
        .bind(data.full_name.clone().unwrap_or(existing.full_name))
        .bind(data.role.clone().unwrap_or(existing.role))
        .bind(data.avatar_url.clone().or(existing.avatar_url))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(user))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
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

    fn client(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            full_name: "Test Client".to_string(),
            role: None,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn create_stamps_both_timestamps_identically() {
        let pool = test_support::new_pool().await;
        let user = User::create(&pool, &client("a@example.com")).await.unwrap();
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.role, UserRole::Client);
    }

    #[tokio::test]
    async fn update_preserves_absent_fields() {
        let pool = test_support::new_pool().await;
        let user = User::create(&pool, &client("a@example.com")).await.unwrap();

        let updated = User::update(
            &pool,
            user.id,
            &UpdateUser {
                full_name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.full_name, "Renamed");
        assert_eq!(updated.email, "a@example.com");
        assert_eq!(updated.role, UserRole::Client);
        assert_eq!(updated.created_at, user.created_at);
    }

    #[tokio::test]
    async fn delete_makes_lookup_return_none() {
        let pool = test_support::new_pool().await;
        let user = User::create(&pool, &client("a@example.com")).await.unwrap();

        assert_eq!(User::delete(&pool, user.id).await.unwrap(), 1);
        assert!(User::find_by_id(&pool, user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_admins_filters_by_role() {
        let pool = test_support::new_pool().await;
        User::create(&pool, &client("c@example.com")).await.unwrap();
        User::create(
            &pool,
            &CreateUser {
                email: "admin@example.com".to_string(),
                full_name: "Admin".to_string(),
                role: Some(UserRole::Admin),
                avatar_url: None,
            },
        )
        .await
        .unwrap();

        let admins = User::find_admins(&pool).await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "admin@example.com");
    }
}
