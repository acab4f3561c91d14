pub mod bearer_session_validator;
pub mod jwt_session;

pub use bearer_session_validator::{AuthenticateError, BearerSessionValidator};
pub use jwt_session::{JwtSessionConfig, JwtSessionSigner};
