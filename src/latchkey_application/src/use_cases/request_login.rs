use std::time::Duration;

use latchkey_core::{
    Email, EmailClient, EmailMessage, LoginToken, LoginTokenStore, LoginTokenStoreError,
};

pub const MAGIC_LINK_SUBJECT: &str = "Your Magic Login Link";

/// Where magic links point to and how long their tokens live.
#[derive(Debug, Clone)]
pub struct MagicLinkSettings {
    /// Absolute URL of the verification endpoint; the token is appended as
    /// the `token` query parameter.
    pub verify_url: String,
    pub token_ttl: Duration,
}

impl MagicLinkSettings {
    pub fn link_for(&self, token: &LoginToken) -> String {
        format!("{}?token={}", self.verify_url, token.as_str())
    }
}

/// Error types for request login use case
#[derive(Debug, thiserror::Error)]
pub enum RequestLoginError {
    #[error("Login token store error: {0}")]
    LoginTokenStoreError(#[from] LoginTokenStoreError),
}

/// Request login use case - issues a login token and mails the magic link
pub struct RequestLoginUseCase<S, E>
where
    S: LoginTokenStore,
    E: EmailClient,
{
    login_token_store: S,
    email_client: E,
    settings: MagicLinkSettings,
}

impl<S, E> RequestLoginUseCase<S, E>
where
    S: LoginTokenStore,
    E: EmailClient,
{
    pub fn new(login_token_store: S, email_client: E, settings: MagicLinkSettings) -> Self {
        Self {
            login_token_store,
            email_client,
            settings,
        }
    }

    /// Execute the request login use case
    ///
    /// # Arguments
    /// * `email` - Address the magic link is bound to and sent to
    ///
    /// # Returns
    /// The issued token. Email delivery is best-effort: a failed send is
    /// logged and does not fail the request, only a store failure does.
    #[tracing::instrument(name = "RequestLoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<LoginToken, RequestLoginError> {
        let token = LoginToken::generate();

        self.login_token_store
            .store_token(&token, &email, self.settings.token_ttl)
            .await?;

        let message = magic_link_message(&self.settings.link_for(&token), self.settings.token_ttl);

        if let Err(e) = self.email_client.send_email(&email, &message).await {
            tracing::warn!(error = %e, "Failed to deliver magic link email");
        }

        Ok(token)
    }
}

fn magic_link_message(link: &str, token_ttl: Duration) -> EmailMessage {
    let minutes = token_ttl.as_secs().div_ceil(60);

    EmailMessage {
        subject: MAGIC_LINK_SUBJECT.to_string(),
        html_body: format!(
            "<h1>Click the link below to login:</h1>\
             <p><a href=\"{link}\">Login to your account</a></p>\
             <p>This link will expire in {minutes} minutes.</p>"
        ),
        text_body: format!(
            "Click the link below to login:\n\n{link}\n\nThis link will expire in {minutes} minutes.\n"
        ),
    }
}
