use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};

/// Number of random bytes behind every login token (256 bits of entropy).
pub const LOGIN_TOKEN_BYTES: usize = 32;

/// Single-use token embedded in a magic link.
///
/// Freshly generated tokens are 32 bytes from a cryptographically secure RNG,
/// base64url-encoded without padding. Tokens presented by a caller are
/// wrapped as-is; whether they resolve to anything is decided by the store.
#[derive(Debug, Clone)]
pub struct LoginToken(Secret<String>);

impl LoginToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; LOGIN_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(Secret::new(URL_SAFE_NO_PAD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for LoginToken {
    fn from(value: String) -> Self {
        Self(Secret::new(value))
    }
}

impl AsRef<Secret<String>> for LoginToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
