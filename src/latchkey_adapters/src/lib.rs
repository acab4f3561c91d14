pub mod auth_validation;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
