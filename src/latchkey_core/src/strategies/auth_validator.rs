use async_trait::async_trait;

/// Trait for validating authentication on protected requests.
///
/// Validators extract a credential from the incoming request, verify it and
/// produce the claims a protected route needs. For session credentials the
/// credential travels in the `Authorization: Bearer` header.
///
/// # Implementation Note
///
/// The validator receives only the request headers rather than the full
/// request, so non-`Sync` request bodies never have to cross an await point.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// The claims extracted from a valid credential, handed to route handlers.
    type Claims: Clone + Send + Sync + 'static;

    /// The request parts this validator operates on, typically `http::HeaderMap`.
    type RequestParts: Send + Sync;

    /// Errors that can occur during validation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate authentication from the request parts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credential is present
    /// - The credential is malformed, wrongly signed or expired
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
