use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use latchkey_core::{AuthValidator, Email};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::auth_validation::AuthenticateError;

use super::error::AuthApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProtectedResponse {
    pub message: String,
}

/// Example resource that requires a valid session credential.
#[tracing::instrument(name = "Protected", skip_all)]
pub async fn protected<A>(
    State(validator): State<A>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthApiError>
where
    A: AuthValidator<Claims = Email, RequestParts = HeaderMap, Error = AuthenticateError>,
{
    let email = validator.validate(&headers).await?;

    Ok(Json(ProtectedResponse {
        message: format!(
            "Hello {}! This is a protected route.",
            email.as_ref().expose_secret()
        ),
    }))
}
