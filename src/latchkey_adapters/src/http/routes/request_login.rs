use axum::{Json, extract::State, response::IntoResponse};
use latchkey_application::{MagicLinkSettings, RequestLoginUseCase};
use latchkey_core::{Email, EmailClient, LoginTokenStore};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;

pub const MAGIC_LINK_SENT_MESSAGE: &str = "Magic link sent to your email";

#[derive(Deserialize)]
pub struct RequestLoginRequest {
    pub email: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequestLoginResponse {
    pub message: String,
}

/// Issue a login token and mail the magic link. The answer is the same for
/// every syntactically valid address.
#[tracing::instrument(name = "Request Login", skip_all)]
pub async fn request_login<S, E>(
    State((login_token_store, email_client, magic_link)): State<(S, E, MagicLinkSettings)>,
    Json(request): Json<RequestLoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: LoginTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = RequestLoginUseCase::new(login_token_store, email_client, magic_link);
    use_case.execute(email).await?;

    Ok(Json(RequestLoginResponse {
        message: MAGIC_LINK_SENT_MESSAGE.to_string(),
    }))
}
