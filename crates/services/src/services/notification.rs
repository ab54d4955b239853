//! Persists notifications and fans the matching transactional email out to
//! the affected user.

use db::models::{
    notification::{CreateNotification, Notification, NotificationType},
    user::{User, UserRole},
};
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use super::email::{EmailError, EmailService};

#[derive(Clone)]
pub struct NotificationService {
    email: EmailService,
}

impl NotificationService {
    pub fn new(email: EmailService) -> Self {
        Self { email }
    }

    /// Persist a notification, then send the templated email for its type.
    ///
    /// The two side effects are deliberately not atomic: a failed email send
    /// is logged and never rolls the stored notification back.
    pub async fn dispatch(
        &self,
        pool: &SqlitePool,
        data: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let notification = Notification::create(pool, data).await?;

        match User::find_by_id(pool, data.user_id).await {
            Ok(Some(user)) => {
                if let Err(error) = self.send_email_for(&user, &notification).await {
                    warn!(
                        user_id = %user.id,
                        notification_id = %notification.id,
                        %error,
                        "notification email failed"
                    );
                }
            }
            Ok(None) => {
                debug!(user_id = %data.user_id, "notification target user not found, skipping email");
            }
            Err(error) => {
                warn!(user_id = %data.user_id, %error, "could not load notification target user");
            }
        }

        Ok(notification)
    }

    /// One notification per admin user.
    pub async fn notify_admins(
        &self,
        pool: &SqlitePool,
        title: &str,
        message: &str,
        notification_type: NotificationType,
        link: Option<String>,
    ) -> Result<usize, sqlx::Error> {
        let admins = User::find_admins(pool).await?;
        let count = admins.len();
        for admin in admins {
            self.dispatch(
                pool,
                &CreateNotification {
                    user_id: admin.id,
                    title: title.to_string(),
                    message: message.to_string(),
                    notification_type: notification_type.clone(),
                    link: link.clone(),
                },
            )
            .await?;
        }
        Ok(count)
    }

    pub async fn notify_user(
        &self,
        pool: &SqlitePool,
        user_id: Uuid,
        title: &str,
        message: &str,
        notification_type: NotificationType,
        link: Option<String>,
    ) -> Result<Notification, sqlx::Error> {
        self.dispatch(
            pool,
            &CreateNotification {
                user_id,
                title: title.to_string(),
                message: message.to_string(),
                notification_type,
                link,
            },
        )
        .await
    }

    async fn send_email_for(
        &self,
        user: &User,
        notification: &Notification,
    ) -> Result<(), EmailError> {
        match notification.notification_type {
            NotificationType::Project => {
                self.email
                    .send_project_update(&user.email, &notification.title, &notification.message)
                    .await
            }
            NotificationType::Support => {
                self.email
                    .send_support_ticket(
                        &user.email,
                        &notification.title,
                        &notification.message,
                        user.role == UserRole::Admin,
                    )
                    .await
            }
            NotificationType::Meeting => {
                self.email
                    .send_meeting_status(
                        &user.email,
                        &notification.title,
                        &notification.message,
                        None,
                    )
                    .await
            }
            NotificationType::Payment | NotificationType::System => {
                self.email
                    .send_notification(
                        &user.email,
                        &notification.title,
                        &notification.message,
                        notification.link.as_deref(),
                    )
                    .await
            }
        }
    }
}
