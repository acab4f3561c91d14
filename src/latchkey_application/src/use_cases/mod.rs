pub mod redeem_login_token;
pub mod request_login;
pub mod validate_session;
