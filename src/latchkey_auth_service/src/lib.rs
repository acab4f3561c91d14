mod auth_service;
mod helpers;
pub mod tracing;

pub use auth_service::AuthService;
pub use helpers::{configure_email_client, configure_redis, get_redis_client};
