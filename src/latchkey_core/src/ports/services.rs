use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    email_message::EmailMessage,
    session::{SessionClaims, SessionCredential},
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String>;
}

/// Source of wall-clock time for session credential issuance and expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to sign session credential: {0}")]
    SigningFailed(String),
    #[error("Session lifetime out of range")]
    InvalidLifetime,
}

/// Reasons a presented session credential is rejected.
///
/// These are kept apart for diagnostics only; the HTTP boundary folds all of
/// them into one "not authenticated" answer.
#[derive(Debug, Error, PartialEq)]
pub enum CredentialError {
    #[error("Malformed credential")]
    MalformedCredential,
    #[error("Invalid credential signature")]
    InvalidSignature,
    #[error("Credential expired")]
    CredentialExpired,
}

/// Mints signed session credentials for an authenticated email address.
pub trait SessionIssuer: Send + Sync {
    fn issue(&self, subject: &Email) -> Result<SessionCredential, SessionError>;
}

/// Checks a presented credential against the signing key and the clock.
/// Implementations must not consult any store.
pub trait SessionValidator: Send + Sync {
    fn validate(&self, credential: &str) -> Result<SessionClaims, CredentialError>;
}
