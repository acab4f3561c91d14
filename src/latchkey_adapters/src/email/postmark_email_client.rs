use latchkey_core::{Email, EmailClient, EmailMessage};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

const EMAIL_ENDPOINT: &str = "/email";
const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

/// Delivers magic link emails through the Postmark HTTP API.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    server_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        server_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            server_token,
        }
    }

    fn endpoint(&self) -> Result<Url, String> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(EMAIL_ENDPOINT))
            .map_err(|e| format!("invalid Postmark base url {}: {e}", self.base_url))
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Postmark send", skip_all)]
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        let body = PostmarkMessage {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: &message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(self.endpoint()?)
            .header(POSTMARK_AUTH_HEADER, self.server_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Postmark rejected the message with status {status}"));
        }

        tracing::debug!(%status, "Postmark accepted the message");
        Ok(())
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct PostmarkMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
