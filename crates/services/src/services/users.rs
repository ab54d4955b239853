use db::models::{
    notification::NotificationType,
    user::{CreateUser, User},
};
use sqlx::SqlitePool;
use tracing::warn;

use super::{email::EmailService, notification::NotificationService};

pub struct UserService;

impl UserService {
    /// Register a user: persist the record, tell the admins, and send the
    /// welcome email. The welcome email failing never fails registration.
    pub async fn register(
        pool: &SqlitePool,
        notifier: &NotificationService,
        email: &EmailService,
        data: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let user = User::create(pool, data).await?;

        notifier
            .notify_admins(
                pool,
                "New User Registered",
                &format!("{} has registered as a {}.", user.full_name, user.role),
                NotificationType::System,
                Some("/admin/clients".to_string()),
            )
            .await?;

        if let Err(error) = email.send_welcome(&user.email, &user.full_name).await {
            warn!(user_id = %user.id, %error, "welcome email failed");
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::{
        models::{notification::Notification, user::UserRole},
        test_support,
    };

    #[tokio::test]
    async fn registration_notifies_existing_admins() {
        let pool = test_support::new_pool().await;
        let email = EmailService::disabled();
        let notifier = NotificationService::new(email.clone());

        let admin = UserService::register(
            &pool,
            &notifier,
            &email,
            &CreateUser {
                email: "admin@example.com".to_string(),
                full_name: "First Admin".to_string(),
                role: Some(UserRole::Admin),
                avatar_url: None,
            },
        )
        .await
        .unwrap();

        UserService::register(
            &pool,
            &notifier,
            &email,
            &CreateUser {
                email: "client@example.com".to_string(),
                full_name: "New Client".to_string(),
                role: None,
                avatar_url: None,
            },
        )
        .await
        .unwrap();

        let notes = Notification::find_by_user_id(&pool, admin.id).await.unwrap();
        // The admin self-registration also fans out to admins, so the second
        // registration is the second entry.
        assert_eq!(notes.len(), 2);
        assert!(notes[0].message.contains("New Client") || notes[1].message.contains("New Client"));
    }
}
