pub mod email;
pub mod email_message;
pub mod login_token;
pub mod session;
