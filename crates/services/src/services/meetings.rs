use db::models::{
    meeting_request::{CreateMeetingRequest, MeetingRequest, UpdateMeetingRequest},
    notification::NotificationType,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::notification::NotificationService;

pub struct MeetingService;

impl MeetingService {
    pub async fn create(
        pool: &SqlitePool,
        notifier: &NotificationService,
        data: &CreateMeetingRequest,
    ) -> Result<MeetingRequest, sqlx::Error> {
        let meeting = MeetingRequest::create(pool, data).await?;

        notifier
            .notify_admins(
                pool,
                "New Meeting Request",
                &format!("A new meeting for \"{}\" has been requested.", meeting.purpose),
                NotificationType::Meeting,
                Some("/admin/meetings".to_string()),
            )
            .await?;

        Ok(meeting)
    }

    pub async fn update(
        pool: &SqlitePool,
        notifier: &NotificationService,
        id: Uuid,
        data: &UpdateMeetingRequest,
    ) -> Result<Option<MeetingRequest>, sqlx::Error> {
        let Some(before) = MeetingRequest::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let Some(meeting) = MeetingRequest::update(pool, id, data).await? else {
            return Ok(None);
        };

        if meeting.status != before.status {
            notifier
                .notify_user(
                    pool,
                    meeting.client_id,
                    "Meeting Updated",
                    &format!(
                        "Your meeting request for \"{}\" has been {}.",
                        meeting.purpose, meeting.status
                    ),
                    NotificationType::Meeting,
                    Some("/meetings".to_string()),
                )
                .await?;
        }

        Ok(Some(meeting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email::EmailService;
    use chrono::Utc;
    use db::{
        models::{
            meeting_request::MeetingStatus,
            notification::Notification,
            user::{CreateUser, User, UserRole},
        },
        test_support,
    };

    #[tokio::test]
    async fn accepting_a_meeting_notifies_the_client() {
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
        let admin = User::create(
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

        let meeting = MeetingService::create(
            &pool,
            &notifier,
            &CreateMeetingRequest {
                project_id: None,
                client_id: client.id,
                requested_date: Utc::now(),
                duration_minutes: 45,
                purpose: "Scope review".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            Notification::find_by_user_id(&pool, admin.id).await.unwrap().len(),
            1
        );

        MeetingService::update(
            &pool,
            &notifier,
            meeting.id,
            &UpdateMeetingRequest {
                status: Some(MeetingStatus::Accepted),
                meeting_link: Some("https://meet.example/xyz".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        let notes = Notification::find_by_user_id(&pool, client.id).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.contains("accepted"));
    }
}
