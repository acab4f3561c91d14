use latchkey_core::{
    LoginToken, LoginTokenStore, LoginTokenStoreError, SessionCredential, SessionError,
    SessionIssuer,
};

/// Error types for redeem login token use case
#[derive(Debug, thiserror::Error)]
pub enum RedeemLoginTokenError {
    /// Never issued, already redeemed or expired. Callers must not be able
    /// to tell these apart.
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("Login token store error: {0}")]
    LoginTokenStoreError(#[from] LoginTokenStoreError),
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),
}

/// Redeem login token use case - consumes a magic link token exactly once and
/// exchanges it for a signed session credential
pub struct RedeemLoginTokenUseCase<S, I>
where
    S: LoginTokenStore,
    I: SessionIssuer,
{
    login_token_store: S,
    session_issuer: I,
}

impl<S, I> RedeemLoginTokenUseCase<S, I>
where
    S: LoginTokenStore,
    I: SessionIssuer,
{
    pub fn new(login_token_store: S, session_issuer: I) -> Self {
        Self {
            login_token_store,
            session_issuer,
        }
    }

    /// Execute the redeem login token use case
    ///
    /// # Arguments
    /// * `token` - The token as presented by the caller
    ///
    /// # Returns
    /// A session credential whose subject is the email the token was bound to
    #[tracing::instrument(name = "RedeemLoginTokenUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: LoginToken,
    ) -> Result<SessionCredential, RedeemLoginTokenError> {
        // The binding is gone before any credential exists
        let email = self
            .login_token_store
            .get_and_delete(&token)
            .await?
            .ok_or(RedeemLoginTokenError::InvalidOrExpiredToken)?;

        let credential = self.session_issuer.issue(&email)?;

        Ok(credential)
    }
}
