use async_trait::async_trait;
use axum::http::{HeaderMap, header::AUTHORIZATION};
use latchkey_application::ValidateSessionUseCase;
use latchkey_core::{AuthValidator, CredentialError, Email, SessionValidator};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error, PartialEq)]
pub enum AuthenticateError {
    /// No `Authorization` header, or one that does not use the Bearer scheme.
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Validates session credentials carried as `Authorization: Bearer <credential>`.
#[derive(Clone)]
pub struct BearerSessionValidator<V> {
    session_validator: V,
}

impl<V> BearerSessionValidator<V> {
    pub fn new(session_validator: V) -> Self {
        Self { session_validator }
    }
}

#[async_trait]
impl<V> AuthValidator for BearerSessionValidator<V>
where
    V: SessionValidator + Clone + 'static,
{
    type Claims = Email;
    type RequestParts = HeaderMap;
    type Error = AuthenticateError;

    async fn validate(&self, headers: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let credential = extract_bearer_credential(headers)?;

        let use_case = ValidateSessionUseCase::new(self.session_validator.clone());
        Ok(use_case.execute(credential)?)
    }
}

pub fn extract_bearer_credential(headers: &HeaderMap) -> Result<&str, AuthenticateError> {
    let credential = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthenticateError::AuthenticationRequired)?
        .trim();

    if credential.is_empty() {
        return Err(CredentialError::MalformedCredential.into());
    }

    Ok(credential)
}
