use latchkey_core::{CredentialError, Email, SessionValidator};

/// Validate session use case - checks a presented session credential and
/// returns the authenticated email. Pure computation, no store access.
pub struct ValidateSessionUseCase<V>
where
    V: SessionValidator,
{
    session_validator: V,
}

impl<V> ValidateSessionUseCase<V>
where
    V: SessionValidator,
{
    pub fn new(session_validator: V) -> Self {
        Self { session_validator }
    }

    #[tracing::instrument(name = "ValidateSessionUseCase::execute", skip_all)]
    pub fn execute(&self, credential: &str) -> Result<Email, CredentialError> {
        match self.session_validator.validate(credential) {
            Ok(claims) => Ok(claims.subject),
            Err(e) => {
                tracing::debug!(reason = %e, "Session credential rejected");
                Err(e)
            }
        }
    }
}
