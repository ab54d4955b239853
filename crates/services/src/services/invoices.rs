use db::models::{
    invoice::{CreateInvoice, Invoice, InvoiceStatus, UpdateInvoice},
    notification::NotificationType,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::notification::NotificationService;

pub struct InvoiceService;

impl InvoiceService {
    pub async fn create(
        pool: &SqlitePool,
        notifier: &NotificationService,
        data: &CreateInvoice,
    ) -> Result<Invoice, sqlx::Error> {
        let invoice = Invoice::create(pool, data).await?;

        notifier
            .notify_user(
                pool,
                invoice.client_id,
                "New Invoice Issued",
                &format!(
                    "A new invoice {} for ${:.2} has been issued.",
                    invoice.invoice_number, invoice.amount
                ),
                NotificationType::Payment,
                Some("/invoices".to_string()),
            )
            .await?;

        Ok(invoice)
    }

    /// Merge an update into an invoice. A transition into `paid` notifies
    /// every admin plus the client; any other change notifies the client
    /// only.
    pub async fn update(
        pool: &SqlitePool,
        notifier: &NotificationService,
        id: Uuid,
        data: &UpdateInvoice,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let Some(before) = Invoice::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let Some(invoice) = Invoice::update(pool, id, data).await? else {
            return Ok(None);
        };

        let became_paid =
            invoice.status == InvoiceStatus::Paid && before.status != InvoiceStatus::Paid;

        if became_paid {
            notifier
                .notify_admins(
                    pool,
                    "Invoice Paid",
                    &format!("Invoice {} has been marked as paid.", invoice.invoice_number),
                    NotificationType::Payment,
                    Some("/admin/invoices".to_string()),
                )
                .await?;
            notifier
                .notify_user(
                    pool,
                    invoice.client_id,
                    "Payment Received",
                    &format!(
                        "We have received your payment for Invoice {}. Thank you!",
                        invoice.invoice_number
                    ),
                    NotificationType::Payment,
                    Some(format!("/invoices/{}", invoice.id)),
                )
                .await?;
        } else {
            notifier
                .notify_user(
                    pool,
                    invoice.client_id,
                    "Invoice Updated",
                    &format!("Invoice {} has been updated.", invoice.invoice_number),
                    NotificationType::Payment,
                    Some(format!("/invoices/{}", invoice.id)),
                )
                .await?;
        }

        Ok(Some(invoice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email::EmailService;
    use chrono::Utc;
    use db::{
        models::{
            notification::Notification,
            user::{CreateUser, User, UserRole},
        },
        test_support,
    };

    async fn seed(pool: &SqlitePool) -> (User, User) {
        let client = User::create(
            pool,
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
            pool,
            &CreateUser {
                email: "admin@example.com".to_string(),
                full_name: "Admin".to_string(),
                role: Some(UserRole::Admin),
                avatar_url: None,
            },
        )
        .await
        .unwrap();
        (client, admin)
    }

    fn invoice_for(client_id: Uuid) -> CreateInvoice {
        CreateInvoice {
            project_id: Uuid::new_v4(),
            client_id,
            invoice_number: "INV-007".to_string(),
            amount: 1500.0,
            due_date: Utc::now(),
            status: None,
            description: None,
            notes: None,
            payment_qr_url: None,
            bank_details: None,
        }
    }

    async fn total_notifications(pool: &SqlitePool, users: &[&User]) -> usize {
        let mut total = 0;
        for user in users {
            total += Notification::find_by_user_id(pool, user.id).await.unwrap().len();
        }
        total
    }

    #[tokio::test]
    async fn marking_paid_notifies_admin_and_client() {
        let pool = test_support::new_pool().await;
        let notifier = NotificationService::new(EmailService::disabled());
        let (client, admin) = seed(&pool).await;

        let invoice = InvoiceService::create(&pool, &notifier, &invoice_for(client.id))
            .await
            .unwrap();
        let before = total_notifications(&pool, &[&client, &admin]).await;

        InvoiceService::update(
            &pool,
            &notifier,
            invoice.id,
            &UpdateInvoice {
                status: Some(InvoiceStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        // Exactly two new notifications: one admin, one client.
        let after = total_notifications(&pool, &[&client, &admin]).await;
        assert_eq!(after - before, 2);
        assert_eq!(
            Notification::find_by_user_id(&pool, admin.id).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn other_updates_notify_the_client_only() {
        let pool = test_support::new_pool().await;
        let notifier = NotificationService::new(EmailService::disabled());
        let (client, admin) = seed(&pool).await;

        let invoice = InvoiceService::create(&pool, &notifier, &invoice_for(client.id))
            .await
            .unwrap();
        let before = total_notifications(&pool, &[&client, &admin]).await;

        InvoiceService::update(
            &pool,
            &notifier,
            invoice.id,
            &UpdateInvoice {
                status: Some(InvoiceStatus::Overdue),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        let after = total_notifications(&pool, &[&client, &admin]).await;
        assert_eq!(after - before, 1);
        assert!(Notification::find_by_user_id(&pool, admin.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn paying_an_already_paid_invoice_is_not_a_transition() {
        let pool = test_support::new_pool().await;
        let notifier = NotificationService::new(EmailService::disabled());
        let (client, admin) = seed(&pool).await;

        let invoice = InvoiceService::create(&pool, &notifier, &invoice_for(client.id))
            .await
            .unwrap();
        InvoiceService::update(
            &pool,
            &notifier,
            invoice.id,
            &UpdateInvoice {
                status: Some(InvoiceStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let before = total_notifications(&pool, &[&client, &admin]).await;

        InvoiceService::update(
            &pool,
            &notifier,
            invoice.id,
            &UpdateInvoice {
                status: Some(InvoiceStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let after = total_notifications(&pool, &[&client, &admin]).await;
        assert_eq!(after - before, 1);
    }
}
