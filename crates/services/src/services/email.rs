//! Outbound transactional email over a simple HTTP webhook.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email endpoint returned {0}")]
    Status(StatusCode),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    /// Base URL of the dashboard, used for links inside templates.
    pub app_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<&'a [EmailAttachment]>,
}

/// HTTP client for the mail webhook. When no endpoint is configured every
/// send is skipped, which keeps notification persistence working in
/// development and tests.
#[derive(Clone)]
pub struct EmailService {
    config: Option<EmailConfig>,
    client: reqwest::Client,
}

impl EmailService {
    pub fn new(config: Option<EmailConfig>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    fn app_url(&self) -> &str {
        self.config.as_ref().map(|c| c.app_url.as_str()).unwrap_or("")
    }

    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        attachments: Option<&[EmailAttachment]>,
    ) -> Result<(), EmailError> {
        let Some(config) = &self.config else {
            debug!(to, subject, "email not configured, skipping send");
            return Ok(());
        };

        let response = self
            .client
            .post(&config.api_url)
            .header("x-api-key", &config.api_key)
            .json(&SendEmailBody {
                to,
                subject,
                html,
                attachments,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EmailError::Status(response.status()));
        }
        Ok(())
    }

    pub async fn send_welcome(&self, to: &str, full_name: &str) -> Result<(), EmailError> {
        let html = format!(
            r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h1 style="color: #000;">Welcome to BridgeBreak!</h1>
  <p>Hi {full_name},</p>
  <p>Thank you for registering with BridgeBreak. We're excited to have you on board!</p>
  <p>You can now log in and start creating projects, tracking progress, and managing your work with us.</p>
  <p>If you have any questions, feel free to reach out through our support system.</p>
  <p>Best regards,<br>The BridgeBreak Team</p>
</div>"#
        );
        self.send(to, "Welcome to BridgeBreak", &html, None).await
    }

    pub async fn send_project_update(
        &self,
        to: &str,
        title: &str,
        message: &str,
    ) -> Result<(), EmailError> {
        let app_url = self.app_url();
        let html = format!(
            r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; border: 1px solid #eee; padding: 20px; border-radius: 10px;">
  <h1 style="color: #000; font-size: 24px;">Project Update Alert</h1>
  <p><strong>{title}</strong></p>
  <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px; margin: 20px 0;">
    <p style="margin: 0; white-space: pre-wrap;">{message}</p>
  </div>
  <p>Please log in to your dashboard to view the current project status and details.</p>
  <div style="text-align: center; margin: 30px 0;">
    <a href="{app_url}/dashboard" style="background-color: #000; color: #fff; padding: 12px 25px; text-decoration: none; border-radius: 5px; font-weight: bold;">View Dashboard</a>
  </div>
  <p>Best regards,<br>The BridgeBreak Team</p>
</div>"#
        );
        self.send(to, &format!("Project Updated: {title}"), &html, None)
            .await
    }

    pub async fn send_support_ticket(
        &self,
        to: &str,
        subject: &str,
        description: &str,
        is_admin: bool,
    ) -> Result<(), EmailError> {
        let header = if is_admin {
            "New Support Ticket Received"
        } else {
            "Support Ticket Update"
        };
        let app_url = self.app_url();
        let html = format!(
            r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; border: 1px solid #eee; padding: 20px; border-radius: 10px;">
  <h1 style="color: #000; font-size: 24px;">{header}</h1>
  <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px; margin: 20px 0;">
    <p style="margin: 0;"><strong>Subject:</strong> {subject}</p>
    <p style="margin: 10px 0 0 0; white-space: pre-wrap;"><strong>Description/Update:</strong><br>{description}</p>
  </div>
  <p>Log in to the portal to manage this ticket.</p>
  <div style="text-align: center; margin: 30px 0;">
    <a href="{app_url}/dashboard" style="background-color: #000; color: #fff; padding: 12px 25px; text-decoration: none; border-radius: 5px; font-weight: bold;">Access Portal</a>
  </div>
  <p>Best regards,<br>The BridgeBreak Team</p>
</div>"#
        );
        self.send(to, &format!("Support Alert: {subject}"), &html, None)
            .await
    }

    pub async fn send_meeting_status(
        &self,
        to: &str,
        title: &str,
        message: &str,
        meeting_link: Option<&str>,
    ) -> Result<(), EmailError> {
        let link_block = match meeting_link {
            Some(link) => format!(
                r#"<div style="text-align: center; margin: 30px 0;">
    <a href="{link}" style="background-color: #000; color: #fff; padding: 12px 25px; text-decoration: none; border-radius: 5px; font-weight: bold;">Join Meeting</a>
  </div>"#
            ),
            None => {
                "<p>If a meeting link was scheduled, you will receive a calendar invite shortly.</p>"
                    .to_string()
            }
        };
        let html = format!(
            r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; border: 1px solid #eee; padding: 20px; border-radius: 10px;">
  <h1 style="color: #000; font-size: 24px;">{title}</h1>
  <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px; margin: 20px 0;">
    <p style="margin: 0; white-space: pre-wrap;">{message}</p>
  </div>
  {link_block}
  <p>Best regards,<br>The BridgeBreak Team</p>
</div>"#
        );
        self.send(to, title, &html, None).await
    }

    /// Generic template used for payment and system notifications.
    pub async fn send_notification(
        &self,
        to: &str,
        title: &str,
        message: &str,
        link: Option<&str>,
    ) -> Result<(), EmailError> {
        let app_url = self.app_url();
        let link_block = match link {
            Some(link) => format!(
                r#"<div style="text-align: center; margin: 30px 0;">
    <a href="{app_url}{link}" style="background-color: #000; color: #fff; padding: 12px 25px; text-decoration: none; border-radius: 5px; font-weight: bold;">View Details</a>
  </div>"#
            ),
            None => String::new(),
        };
        let html = format!(
            r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; border: 1px solid #eee; padding: 20px; border-radius: 10px;">
  <h1 style="color: #000; font-size: 24px;">{title}</h1>
  <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px; margin: 20px 0;">
    <p style="margin: 0; white-space: pre-wrap;">{message}</p>
  </div>
  {link_block}
  <p>Best regards,<br>The BridgeBreak Team</p>
</div>"#
        );
        self.send(to, title, &html, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_service_skips_sending() {
        let email = EmailService::disabled();
        assert!(!email.is_enabled());
        email
            .send("a@example.com", "Hello", "<p>hi</p>", None)
            .await
            .unwrap();
    }
}
