use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};

use crate::domain::email::Email;

/// Signed, self-contained session credential handed out after a successful
/// magic link redemption. Nothing about it is persisted server side.
#[derive(Debug, Clone)]
pub struct SessionCredential {
    token: Secret<String>,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionCredential {
    pub fn new(token: Secret<String>, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            issued_at,
            expires_at,
        }
    }

    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Lifetime of the credential in whole seconds, as advertised to clients.
    pub fn expires_in_seconds(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

/// The assertions carried by a session credential that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionClaims {
    pub subject: Email,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
