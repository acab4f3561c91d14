use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use latchkey_core::{Email, LoginToken, LoginTokenStore, LoginTokenStoreError};
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct StoredLoginToken {
    email: Email,
    expires_at: Instant,
}

/// In-process login token store for development and tests.
///
/// Expiry is tracked with `tokio::time`, so paused-clock tests can move past
/// the time to live without sleeping.
#[derive(Debug, Default, Clone)]
pub struct HashMapLoginTokenStore {
    tokens: Arc<RwLock<HashMap<String, StoredLoginToken>>>,
}

impl HashMapLoginTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let tokens = self.tokens.read().await;
        tokens.values().filter(|t| t.expires_at > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl LoginTokenStore for HashMapLoginTokenStore {
    async fn store_token(
        &self,
        token: &LoginToken,
        email: &Email,
        time_to_live: Duration,
    ) -> Result<(), LoginTokenStoreError> {
        let now = Instant::now();
        let mut tokens = self.tokens.write().await;

        // Drop whatever has expired so abandoned links don't pile up
        tokens.retain(|_, stored| stored.expires_at > now);

        tokens.insert(
            token.as_str().to_owned(),
            StoredLoginToken {
                email: email.clone(),
                expires_at: now + time_to_live,
            },
        );
        Ok(())
    }

    async fn get_and_delete(
        &self,
        token: &LoginToken,
    ) -> Result<Option<Email>, LoginTokenStoreError> {
        let mut tokens = self.tokens.write().await;

        Ok(tokens
            .remove(token.as_str())
            .filter(|stored| stored.expires_at > Instant::now())
            .map(|stored| stored.email))
    }
}
