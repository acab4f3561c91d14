use latchkey_core::{Email, EmailClient, EmailMessage};

use super::{PostmarkEmailClient, RecordingEmailClient};

/// The email client selected by `email_client.delivery`.
#[derive(Clone)]
pub enum EmailDelivery {
    Enabled(PostmarkEmailClient),
    Disabled(RecordingEmailClient),
}

#[async_trait::async_trait]
impl EmailClient for EmailDelivery {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        match self {
            EmailDelivery::Enabled(client) => client.send_email(recipient, message).await,
            EmailDelivery::Disabled(client) => client.send_email(recipient, message).await,
        }
    }
}
