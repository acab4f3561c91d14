use std::time::Duration;

use latchkey_core::{Email, LoginToken, LoginTokenStore, LoginTokenStoreError};
use redis::aio::MultiplexedConnection;
use secrecy::{ExposeSecret, Secret};

/// Redis-backed login token store.
///
/// Bindings are written with `SET ... EX` so Redis owns expiry, and consumed
/// with `GETDEL` so a token can only ever be redeemed by one caller.
#[derive(Clone)]
pub struct RedisLoginTokenStore {
    conn: MultiplexedConnection,
}

impl RedisLoginTokenStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl LoginTokenStore for RedisLoginTokenStore {
    async fn store_token(
        &self,
        token: &LoginToken,
        email: &Email,
        time_to_live: Duration,
    ) -> Result<(), LoginTokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.clone();

        redis::cmd("SET")
            .arg(&key)
            .arg(email.as_ref().expose_secret())
            .arg("EX")
            .arg(time_to_live.as_secs())
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| LoginTokenStoreError::Unavailable(e.to_string()))
    }

    async fn get_and_delete(
        &self,
        token: &LoginToken,
    ) -> Result<Option<Email>, LoginTokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.clone();

        let stored: Option<String> = redis::cmd("GETDEL")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| LoginTokenStoreError::Unavailable(e.to_string()))?;

        stored
            .map(|email| {
                Email::try_from(Secret::new(email))
                    .map_err(|e| LoginTokenStoreError::UnexpectedError(e.to_string()))
            })
            .transpose()
    }
}

// Namespace for login token bindings
const LOGIN_TOKEN_KEY_PREFIX: &str = "login_token:";

fn get_key(token: &LoginToken) -> String {
    format!("{}{}", LOGIN_TOKEN_KEY_PREFIX, token.as_str())
}
