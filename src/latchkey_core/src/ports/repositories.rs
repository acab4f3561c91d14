use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, login_token::LoginToken};

// LoginTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum LoginTokenStoreError {
    #[error("Login token store unavailable: {0}")]
    Unavailable(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for LoginTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Unavailable(_), Self::Unavailable(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Key-value store holding `token -> email` bindings with automatic expiry.
///
/// The store is the only authority on login token expiry: once the time to
/// live has elapsed the binding must no longer be returned.
#[async_trait]
pub trait LoginTokenStore: Send + Sync {
    async fn store_token(
        &self,
        token: &LoginToken,
        email: &Email,
        time_to_live: Duration,
    ) -> Result<(), LoginTokenStoreError>;

    /// Return the email bound to `token` and remove the binding in one atomic
    /// step. Concurrent callers with the same token see `Some` at most once.
    async fn get_and_delete(&self, token: &LoginToken)
    -> Result<Option<Email>, LoginTokenStoreError>;
}
