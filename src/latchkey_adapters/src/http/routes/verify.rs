use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use latchkey_application::RedeemLoginTokenUseCase;
use latchkey_core::{LoginToken, LoginTokenStore, SessionIssuer};
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;

pub const TOKEN_TYPE_BEARER: &str = "bearer";

#[derive(Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Redeem the magic link token for a bearer session credential.
#[tracing::instrument(name = "Verify", skip_all)]
pub async fn verify<S, I>(
    State((login_token_store, session_issuer)): State<(S, I)>,
    Query(query): Query<VerifyQuery>,
) -> Result<impl IntoResponse, AuthApiError>
where
    S: LoginTokenStore + Clone + 'static,
    I: SessionIssuer + Clone + 'static,
{
    let use_case = RedeemLoginTokenUseCase::new(login_token_store, session_issuer);
    let credential = use_case.execute(LoginToken::from(query.token)).await?;

    Ok(Json(VerifyResponse {
        access_token: credential.token().to_owned(),
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: credential.expires_in_seconds(),
    }))
}
