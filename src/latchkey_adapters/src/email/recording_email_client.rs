use std::sync::Arc;

use latchkey_core::{Email, EmailClient, EmailMessage};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub message: EmailMessage,
}

/// Email client used when delivery is disabled.
///
/// Nothing leaves the process: each message is logged and kept in memory so
/// the magic link can still be picked up during development and in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl RecordingEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    pub async fn last_sent_to(&self, recipient: &Email) -> Option<SentEmail> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|email| &email.recipient == recipient)
            .cloned()
    }
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        tracing::info!(
            recipient = %recipient.as_ref().expose_secret(),
            subject = %message.subject,
            body = %message.text_body,
            "Email delivery disabled, recording message"
        );

        self.sent.write().await.push(SentEmail {
            recipient: recipient.clone(),
            message: message.clone(),
        });
        Ok(())
    }
}
