pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    email_message::EmailMessage,
    login_token::LoginToken,
    session::{SessionClaims, SessionCredential},
};

pub use ports::{
    repositories::{LoginTokenStore, LoginTokenStoreError},
    services::{
        Clock, CredentialError, EmailClient, SessionError, SessionIssuer, SessionValidator,
        SystemClock,
    },
};

pub use strategies::auth_validator::AuthValidator;
