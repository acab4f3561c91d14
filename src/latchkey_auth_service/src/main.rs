use color_eyre::eyre::Result;
use latchkey_adapters::{
    auth_validation::JwtSessionSigner, config::AuthServiceSetting,
    persistence::RedisLoginTokenStore,
};
use latchkey_auth_service::{AuthService, configure_email_client, configure_redis};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = AuthServiceSetting::load()?;

    let redis_conn = configure_redis(&config.redis).await?;
    let login_token_store = RedisLoginTokenStore::new(redis_conn);

    let email_client = configure_email_client(&config.email_client)?;
    let session_signer = JwtSessionSigner::new(config.jwt_session_config());

    let auth_service = AuthService::new(
        login_token_store,
        email_client,
        session_signer,
        config.magic_link_settings(),
    );

    let listener = tokio::net::TcpListener::bind(&config.app_address).await?;
    tracing::info!(
        delivery = ?config.email_client.delivery,
        "Starting magic link auth service"
    );

    auth_service
        .run_standalone(listener, Some(config.auth.allowed_origins.clone()))
        .await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
