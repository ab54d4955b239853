use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type, types::Json};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display, Default)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Pending,
    UnderReview,
    Accepted,
    InProgress,
    Testing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Type, Serialize, Deserialize, PartialEq, EnumString, Display)]
#[sqlx(type_name = "live_preview_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LivePreviewType {
    Url,
    Image,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TechnicalConfigCategory {
    Infra,
    Admin,
    Deploy,
}

/// One row of a project's free-form technical configuration panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalConfigEntry {
    pub id: String,
    pub label: String,
    pub value: String,
    pub is_link: Option<bool>,
    pub is_secret: Option<bool>,
    pub category: TechnicalConfigCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTicket {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub attachment_url: Option<String>,
    pub completed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub github_link: Option<String>,
    pub document_url: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub progress_percentage: Option<i32>,
    pub test_asset_url: Option<String>,
    pub deployment_url: Option<String>,
    pub live_preview_type: Option<LivePreviewType>,
    pub live_preview_url: Option<String>,
    pub technical_config: Json<Vec<TechnicalConfigEntry>>,
    pub tickets: Json<Vec<ProjectTicket>>,
    pub notes: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: Option<ProjectStatus>,
    pub github_link: Option<String>,
    pub document_url: Option<String>,
    pub estimated_cost: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub progress_percentage: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub github_link: Option<String>,
    pub document_url: Option<String>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub progress_percentage: Option<i32>,
    pub test_asset_url: Option<String>,
    pub deployment_url: Option<String>,
    pub live_preview_type: Option<LivePreviewType>,
    pub live_preview_url: Option<String>,
    pub technical_config: Option<Vec<TechnicalConfigEntry>>,
    pub tickets: Option<Vec<ProjectTicket>>,
    pub notes: Option<Vec<String>>,
}

impl Project {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM projects ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_client_id(
        pool: &SqlitePool,
        client_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM projects WHERE client_id = $1 ORDER BY created_at DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, data: &CreateProject) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO projects (id, client_id, title, description, status, github_link,
                                     document_url, estimated_cost, deadline, progress_percentage,
                                     technical_config, tickets, notes, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.client_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status.clone().unwrap_or_default())
        .bind(&data.github_link)
        .bind(&data.document_url)
        .bind(data.estimated_cost)
        .bind(data.deadline)
        .bind(data.progress_percentage)
        .bind(Json(Vec::<TechnicalConfigEntry>::new()))
        .bind(Json(Vec::<ProjectTicket>::new()))
        .bind(Json(Vec::<String>::new()))
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let project = sqlx::query_as::<_, Self>(
            r#"UPDATE projects
               SET title = $2, description = $3, status = $4, github_link = $5,
                   document_url = $6, estimated_cost = $7, actual_cost = $8, deadline = $9,
                   progress_percentage = $10, test_asset_url = $11, deployment_url = $12,
                   live_preview_type = $13, live_preview_url = $14, technical_config = $15,
                   tickets = $16, notes = $17, updated_at = $18
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.title.clone().unwrap_or(existing.title))
        .bind(data.description.clone().unwrap_or(existing.description))
        .bind(data.status.clone().unwrap_or(existing.status))
        .bind(data.github_link.clone().or(existing.github_link))
        .bind(data.document_url.clone().or(existing.document_url))
        .bind(data.estimated_cost.or(existing.estimated_cost))
        .bind(data.actual_cost.or(existing.actual_cost))
        .bind(data.deadline.or(existing.deadline))
        .bind(data.progress_percentage.or(existing.progress_percentage))
        .bind(data.test_asset_url.clone().or(existing.test_asset_url))
        .bind(data.deployment_url.clone().or(existing.deployment_url))
        .bind(data.live_preview_type.clone().or(existing.live_preview_type))
        .bind(data.live_preview_url.clone().or(existing.live_preview_url))
        .bind(data.technical_config.clone().map(Json).unwrap_or(existing.technical_config))
        .bind(data.tickets.clone().map(Json).unwrap_or(existing.tickets))
        .bind(data.notes.clone().map(Json).unwrap_or(existing.notes))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(Some(project))
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
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

    fn new_project(client_id: Uuid) -> CreateProject {
        CreateProject {
            client_id,
            title: "Site Rebuild".to_string(),
            description: "Marketing site refresh".to_string(),
            status: None,
            github_link: None,
            document_url: None,
            estimated_cost: Some(4200.0),
            deadline: None,
            progress_percentage: Some(0),
        }
    }

    #[tokio::test]
    async fn create_defaults_to_pending_with_empty_config() {
        let pool = test_support::new_pool().await;
        let project = Project::create(&pool, &new_project(Uuid::new_v4())).await.unwrap();

        assert_eq!(project.status, ProjectStatus::Pending);
        assert!(project.technical_config.0.is_empty());
        assert!(project.tickets.0.is_empty());
        assert_eq!(project.created_at, project.updated_at);
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let pool = test_support::new_pool().await;
        let project = Project::create(&pool, &new_project(Uuid::new_v4())).await.unwrap();

        let updated = Project::update(
            &pool,
            project.id,
            &UpdateProject {
                status: Some(ProjectStatus::InProgress),
                progress_percentage: Some(40),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.progress_percentage, Some(40));
        assert_eq!(updated.title, "Site Rebuild");
        assert_eq!(updated.estimated_cost, Some(4200.0));
    }

    #[tokio::test]
    async fn technical_config_round_trips_through_json_column() {
        let pool = test_support::new_pool().await;
        let project = Project::create(&pool, &new_project(Uuid::new_v4())).await.unwrap();

        let entry = TechnicalConfigEntry {
            id: "cfg-1".to_string(),
            label: "Server IP".to_string(),
            value: "10.0.0.7".to_string(),
            is_link: Some(false),
            is_secret: Some(true),
            category: TechnicalConfigCategory::Infra,
        };
        let updated = Project::update(
            &pool,
            project.id,
            &UpdateProject {
                technical_config: Some(vec![entry]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.technical_config.0.len(), 1);
        assert_eq!(updated.technical_config.0[0].label, "Server IP");
        assert_eq!(updated.technical_config.0[0].is_secret, Some(true));
    }

    #[tokio::test]
    async fn find_by_client_id_filters_other_clients() {
        let pool = test_support::new_pool().await;
        let mine = Uuid::new_v4();
        Project::create(&pool, &new_project(mine)).await.unwrap();
        Project::create(&pool, &new_project(Uuid::new_v4())).await.unwrap();

        let projects = Project::find_by_client_id(&pool, mine).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].client_id, mine);
    }
}
