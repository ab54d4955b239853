use db::models::{
    notification::NotificationType,
    project::{CreateProject, Project, UpdateProject},
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::notification::NotificationService;

pub struct ProjectService;

impl ProjectService {
    /// Create a project and tell the owning client about it.
    pub async fn create(
        pool: &SqlitePool,
        notifier: &NotificationService,
        data: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let project = Project::create(pool, data).await?;

        notifier
            .notify_user(
                pool,
                project.client_id,
                "New Project Created",
                &format!(
                    "Your project \"{}\" has been created and is now active.",
                    project.title
                ),
                NotificationType::Project,
                Some(format!("/projects/{}", project.id)),
            )
            .await?;

        Ok(project)
    }

    /// Merge an update into a project, then notify the client and every
    /// admin that it changed.
    pub async fn update(
        pool: &SqlitePool,
        notifier: &NotificationService,
        id: Uuid,
        data: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let Some(project) = Project::update(pool, id, data).await? else {
            return Ok(None);
        };

        notifier
            .notify_user(
                pool,
                project.client_id,
                "Project Updated",
                &format!("Your project \"{}\" has been updated.", project.title),
                NotificationType::Project,
                Some(format!("/projects/{}", project.id)),
            )
            .await?;
        notifier
            .notify_admins(
                pool,
                "Project Updated",
                &format!("Project \"{}\" has been updated.", project.title),
                NotificationType::Project,
                Some(format!("/admin/projects/{}", project.id)),
            )
            .await?;

        Ok(Some(project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email::EmailService;
    use db::{
        models::{
            notification::Notification,
            project::ProjectStatus,
            user::{CreateUser, User, UserRole},
        },
        test_support,
    };

    async fn seed_user(pool: &SqlitePool, email: &str, role: UserRole) -> User {
        User::create(
            pool,
            &CreateUser {
                email: email.to_string(),
                full_name: email.to_string(),
                role: Some(role),
                avatar_url: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn create_notifies_the_client_only() {
        let pool = test_support::new_pool().await;
        let notifier = NotificationService::new(EmailService::disabled());
        let client = seed_user(&pool, "client@example.com", UserRole::Client).await;
        let admin = seed_user(&pool, "admin@example.com", UserRole::Admin).await;

        ProjectService::create(
            &pool,
            &notifier,
            &CreateProject {
                client_id: client.id,
                title: "Portal".to_string(),
                description: "Client portal build".to_string(),
                status: None,
                github_link: None,
                document_url: None,
                estimated_cost: None,
                deadline: None,
                progress_percentage: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            Notification::find_by_user_id(&pool, client.id).await.unwrap().len(),
            1
        );
        assert!(Notification::find_by_user_id(&pool, admin.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_notifies_client_and_admins() {
        let pool = test_support::new_pool().await;
        let notifier = NotificationService::new(EmailService::disabled());
        let client = seed_user(&pool, "client@example.com", UserRole::Client).await;
        let admin = seed_user(&pool, "admin@example.com", UserRole::Admin).await;

        let project = ProjectService::create(
            &pool,
            &notifier,
            &CreateProject {
                client_id: client.id,
                title: "Portal".to_string(),
                description: "Client portal build".to_string(),
                status: None,
                github_link: None,
                document_url: None,
                estimated_cost: None,
                deadline: None,
                progress_percentage: None,
            },
        )
        .await
        .unwrap();

        ProjectService::update(
            &pool,
            &notifier,
            project.id,
            &UpdateProject {
                status: Some(ProjectStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        // One from create, one from update.
        assert_eq!(
            Notification::find_by_user_id(&pool, client.id).await.unwrap().len(),
            2
        );
        assert_eq!(
            Notification::find_by_user_id(&pool, admin.id).await.unwrap().len(),
            1
        );
    }
}
