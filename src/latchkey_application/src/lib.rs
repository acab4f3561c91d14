pub mod use_cases;

pub use use_cases::{
    redeem_login_token::{RedeemLoginTokenError, RedeemLoginTokenUseCase},
    request_login::{MagicLinkSettings, RequestLoginError, RequestLoginUseCase},
    validate_session::ValidateSessionUseCase,
};
