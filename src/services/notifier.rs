//! Email notifier - business capability layer
//!
//! Best-effort outbound mail on successful submission. Every fault is
//! logged and swallowed; a missed notification never affects the run.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::config::Config;

/// Outbound notification capability.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns whether the message was handed off.
    async fn notify(&self, subject: &str, body: &str) -> bool;
}

/// SMTP notifier (Gmail by default).
pub struct EmailNotifier {
    user: Option<String>,
    pass: Option<String>,
    to: Option<String>,
    smtp_host: String,
}

impl EmailNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            user: config.gmail_user.clone(),
            pass: config.gmail_pass.clone(),
            to: config.notify_to.clone(),
            smtp_host: config.smtp_host.clone(),
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, subject: &str, body: &str) -> bool {
        let (Some(user), Some(pass)) = (self.user.as_deref(), self.pass.as_deref()) else {
            warn!("Email not sent: SMTP credentials not configured");
            return false;
        };
        // Recipient defaults to the sender address
        let to = self.to.as_deref().unwrap_or(user);

        let message = match build_message(user, to, subject, body) {
            Ok(message) => message,
            Err(e) => {
                warn!("Email not sent, invalid message: {}", e);
                return false;
            }
        };

        let mailer = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_host) {
            Ok(builder) => builder
                .credentials(SmtpCredentials::new(user.to_string(), pass.to_string()))
                .build(),
            Err(e) => {
                warn!("Email not sent, SMTP relay setup failed: {}", e);
                return false;
            }
        };

        match mailer.send(message).await {
            Ok(_) => {
                info!("📧 Notification sent to {}", to);
                true
            }
            Err(e) => {
                warn!("Failed to send email: {}", e);
                false
            }
        }
    }
}

fn build_message(from: &str, to: &str, subject: &str, body: &str) -> anyhow::Result<Message> {
    Ok(Message::builder()
        .from(from.parse()?)
        .to(to.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credentials_is_a_silent_no() {
        let notifier = EmailNotifier::new(&Config::default());
        assert!(!notifier.notify("subject", "body").await);
    }

    #[test]
    fn message_builds_with_plain_addresses() {
        let message = build_message("me@example.com", "you@example.com", "Applied", "details");
        assert!(message.is_ok());
    }

    #[test]
    fn invalid_address_is_rejected() {
        let message = build_message("not-an-address", "you@example.com", "Applied", "details");
        assert!(message.is_err());
    }
}
