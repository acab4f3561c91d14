use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use latchkey_application::{RedeemLoginTokenError, RequestLoginError};
use latchkey_core::{EmailError, LoginTokenStoreError, SessionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth_validation::AuthenticateError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("Not authenticated")]
    AuthenticationRequired,

    #[error("Invalid token")]
    InvalidCredential,

    #[error("Service temporarily unavailable")]
    StoreUnavailable,

    #[error("Unexpected error")]
    UnexpectedError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AuthApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,

            AuthApiError::InvalidOrExpiredToken => StatusCode::BAD_REQUEST,

            AuthApiError::AuthenticationRequired | AuthApiError::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }

            AuthApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            AuthApiError::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        let mut response = (status_code, body).into_response();
        if status_code == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<EmailError> for AuthApiError {
    fn from(error: EmailError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<LoginTokenStoreError> for AuthApiError {
    fn from(error: LoginTokenStoreError) -> Self {
        match error {
            LoginTokenStoreError::Unavailable(e) => {
                tracing::error!(error = %e, "Login token store unavailable");
                AuthApiError::StoreUnavailable
            }
            LoginTokenStoreError::UnexpectedError(e) => {
                tracing::error!(error = %e, "Login token store returned unexpected data");
                AuthApiError::UnexpectedError
            }
        }
    }
}

impl From<SessionError> for AuthApiError {
    fn from(error: SessionError) -> Self {
        tracing::error!(error = %error, "Failed to issue session credential");
        AuthApiError::UnexpectedError
    }
}

impl From<RequestLoginError> for AuthApiError {
    fn from(error: RequestLoginError) -> Self {
        match error {
            RequestLoginError::LoginTokenStoreError(e) => e.into(),
        }
    }
}

impl From<RedeemLoginTokenError> for AuthApiError {
    fn from(error: RedeemLoginTokenError) -> Self {
        match error {
            RedeemLoginTokenError::InvalidOrExpiredToken => AuthApiError::InvalidOrExpiredToken,
            RedeemLoginTokenError::LoginTokenStoreError(e) => e.into(),
            RedeemLoginTokenError::SessionError(e) => e.into(),
        }
    }
}

impl From<AuthenticateError> for AuthApiError {
    fn from(error: AuthenticateError) -> Self {
        match error {
            AuthenticateError::AuthenticationRequired => {
                AuthApiError::AuthenticationRequired
            }
            AuthenticateError::Credential(reason) => {
                tracing::debug!(reason = %reason, "Rejected session credential");
                AuthApiError::InvalidCredential
            }
        }
    }
}
