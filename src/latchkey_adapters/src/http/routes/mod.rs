pub mod error;
pub mod protected;
pub mod request_login;
pub mod verify;

pub use error::{AuthApiError, ErrorResponse};
pub use protected::{ProtectedResponse, protected};
pub use request_login::{RequestLoginRequest, RequestLoginResponse, request_login};
pub use verify::{VerifyQuery, VerifyResponse, verify};
