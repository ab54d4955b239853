use db::models::{
    notification::NotificationType,
    support_request::{CreateSupportRequest, SupportRequest, UpdateSupportRequest},
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::notification::NotificationService;

pub struct SupportService;

impl SupportService {
    /// New tickets go to the admin team.
    pub async fn create(
        pool: &SqlitePool,
        notifier: &NotificationService,
        data: &CreateSupportRequest,
    ) -> Result<SupportRequest, sqlx::Error> {
        let request = SupportRequest::create(pool, data).await?;

        notifier
            .notify_admins(
                pool,
                "New Support Ticket",
                &format!("A new ticket \"{}\" has been submitted.", request.subject),
                NotificationType::Support,
                Some(format!("/admin/support/{}", request.id)),
            )
            .await?;

        Ok(request)
    }

    /// Status changes go back to the client; other edits are silent.
    pub async fn update(
        pool: &SqlitePool,
        notifier: &NotificationService,
        id: Uuid,
        data: &UpdateSupportRequest,
    ) -> Result<Option<SupportRequest>, sqlx::Error> {
        let Some(before) = SupportRequest::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let Some(request) = SupportRequest::update(pool, id, data).await? else {
            return Ok(None);
        };

        if request.status != before.status {
            notifier
                .notify_user(
                    pool,
                    request.client_id,
                    "Support Ticket Updated",
                    &format!(
                        "Your ticket \"{}\" has been marked as {}.",
                        request.subject,
                        request.status.to_string().replace('_', " ")
                    ),
                    NotificationType::Support,
                    Some(format!("/support/{}", request.id)),
                )
                .await?;
        }

        Ok(Some(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email::EmailService;
    use db::{
        models::{
            notification::Notification,
            support_request::SupportStatus,
            user::{CreateUser, User},
        },
        test_support,
    };

    #[tokio::test]
    async fn silent_edit_does_not_notify_the_client() {
        let pool = test_support::new_pool().await;
        let notifier = NotificationService::new(EmailService::disabled());
        let client = User::create(
            &pool,
            &CreateUser {
                email: "client@example.com".to_string(),
                full_name: "Client".to_string(),
                role: None,
                avatar_url: None,
            },
        )
        .await
        .unwrap();

        let ticket = SupportService::create(
            &pool,
            &notifier,
            &CreateSupportRequest {
                project_id: None,
                client_id: client.id,
                subject: "Slow pages".to_string(),
                description: "Dashboard takes 10s".to_string(),
                priority: None,
                attachment_url: None,
            },
        )
        .await
        .unwrap();

        // Priority tweak, same status: no client notification.
        SupportService::update(
            &pool,
            &notifier,
            ticket.id,
            &UpdateSupportRequest {
                description: Some("Dashboard takes 10s on 4G".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert!(Notification::find_by_user_id(&pool, client.id).await.unwrap().is_empty());

        SupportService::update(
            &pool,
            &notifier,
            ticket.id,
            &UpdateSupportRequest {
                status: Some(SupportStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        let notes = Notification::find_by_user_id(&pool, client.id).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.contains("in progress"));
    }
}
