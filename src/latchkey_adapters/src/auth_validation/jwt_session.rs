use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use latchkey_core::{
    Clock, CredentialError, Email, SessionClaims, SessionCredential, SessionError, SessionIssuer,
    SessionValidator, SystemClock,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};

const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Clone)]
pub struct JwtSessionConfig {
    pub secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtSessionConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// Issues and validates HS256 session credentials with the process signing key.
///
/// Expiry is checked against the injected [`Clock`] rather than left to the
/// JWT library, since session credentials never touch a store.
#[derive(Clone)]
pub struct JwtSessionSigner<C = SystemClock> {
    config: JwtSessionConfig,
    clock: C,
}

impl JwtSessionSigner<SystemClock> {
    pub fn new(config: JwtSessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> JwtSessionSigner<C> {
    pub fn with_clock(config: JwtSessionConfig, clock: C) -> Self {
        Self { config, clock }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl<C: Clock> SessionIssuer for JwtSessionSigner<C> {
    fn issue(&self, subject: &Email) -> Result<SessionCredential, SessionError> {
        let ttl = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds)
            .ok_or(SessionError::InvalidLifetime)?;

        // JWT timestamps carry whole seconds only
        let issued_at = DateTime::from_timestamp(self.clock.now().timestamp(), 0)
            .ok_or(SessionError::InvalidLifetime)?;
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(SessionError::InvalidLifetime)?;

        let claims = Claims {
            sub: Clone::clone(subject.as_ref()),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = create_token(&claims, self.config.as_bytes())?;

        Ok(SessionCredential::new(
            Secret::new(token),
            issued_at,
            expires_at,
        ))
    }
}

impl<C: Clock> SessionValidator for JwtSessionSigner<C> {
    fn validate(&self, credential: &str) -> Result<SessionClaims, CredentialError> {
        let claims = decode::<Claims>(
            credential,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Self::validation(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                CredentialError::InvalidSignature
            }
            _ => CredentialError::MalformedCredential,
        })?;

        let claims = claims.into_session_claims()?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(CredentialError::CredentialExpired);
        }

        Ok(claims)
    }
}

// Create JWT session token by encoding claims using the signing key
fn create_token(claims: &Claims, secret: &[u8]) -> Result<String, SessionError> {
    encode(
        &Header::new(SESSION_ALGORITHM),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| SessionError::SigningFailed(e.to_string()))
}

#[derive(Debug, Deserialize, Clone)]
struct Claims {
    sub: Secret<String>,
    #[serde(default)]
    iat: i64,
    exp: i64,
}

impl Claims {
    fn into_session_claims(self) -> Result<SessionClaims, CredentialError> {
        let subject =
            Email::try_from(self.sub).map_err(|_| CredentialError::MalformedCredential)?;

        Ok(SessionClaims {
            subject,
            issued_at: timestamp(self.iat)?,
            expires_at: timestamp(self.exp)?,
        })
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, CredentialError> {
    DateTime::from_timestamp(seconds, 0).ok_or(CredentialError::MalformedCredential)
}

impl Serialize for Claims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Claims", 3)?;
        state.serialize_field("sub", &self.sub.expose_secret())?;
        state.serialize_field("iat", &self.iat)?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}
