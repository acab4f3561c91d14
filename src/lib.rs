//! # Latchkey - Magic Link Authentication
//!
//! Facade crate that re-exports the public APIs of the latchkey components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `LoginToken`, `SessionCredential`, `SessionClaims`
//! - **Ports**: `LoginTokenStore`, `EmailClient`, `SessionIssuer`, `SessionValidator`, `Clock`
//! - **Use cases**: `RequestLoginUseCase`, `RedeemLoginTokenUseCase`, `ValidateSessionUseCase`
//! - **Adapters**: `RedisLoginTokenStore`, `JwtSessionSigner`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService`, the axum router serving `/request-login`, `/verify` and `/protected`

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and ports
pub mod core {
    pub use latchkey_core::*;
}

pub use latchkey_core::{
    Email, EmailError, EmailMessage, LoginToken, SessionClaims, SessionCredential,
};

// ============================================================================
// Ports
// ============================================================================

pub use latchkey_core::{
    AuthValidator, Clock, CredentialError, EmailClient, LoginTokenStore, LoginTokenStoreError,
    SessionError, SessionIssuer, SessionValidator, SystemClock,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use latchkey_application::*;
}

pub use latchkey_application::{
    MagicLinkSettings, RedeemLoginTokenError, RedeemLoginTokenUseCase, RequestLoginError,
    RequestLoginUseCase, ValidateSessionUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use latchkey_adapters::http::*;
    }

    /// Login token store implementations
    pub mod persistence {
        pub use latchkey_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use latchkey_adapters::email::*;
    }

    /// Session credential signing and bearer validation
    pub mod auth {
        pub use latchkey_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use latchkey_adapters::config::*;
    }
}

pub use latchkey_adapters::{
    auth_validation::{BearerSessionValidator, JwtSessionConfig, JwtSessionSigner},
    email::{EmailDelivery, PostmarkEmailClient, RecordingEmailClient},
    persistence::{HashMapLoginTokenStore, RedisLoginTokenStore},
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

pub use latchkey_auth_service::{
    AuthService, configure_email_client, configure_redis, get_redis_client,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
pub use tokio;
