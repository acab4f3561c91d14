use latchkey_adapters::{
    config::{EmailClientSettings, EmailDeliveryMode, RedisSettings},
    email::{EmailDelivery, PostmarkEmailClient, RecordingEmailClient},
};
use latchkey_core::Email;
use redis::{Client, RedisResult, aio::MultiplexedConnection};
use secrecy::Secret;

/// Connect to Redis with the configured host and port.
///
/// # Returns
/// A multiplexed connection that can be cloned into every store
pub async fn configure_redis(settings: &RedisSettings) -> RedisResult<MultiplexedConnection> {
    get_redis_client(settings)?
        .get_multiplexed_async_connection()
        .await
}

/// Create a Redis client
///
/// # Arguments
/// * `settings` - Redis host and port
pub fn get_redis_client(settings: &RedisSettings) -> RedisResult<Client> {
    Client::open(settings.url())
}

/// Build the email client for the configured delivery mode.
///
/// With delivery disabled, magic links are only logged and kept in memory.
pub fn configure_email_client(
    settings: &EmailClientSettings,
) -> color_eyre::Result<EmailDelivery> {
    match settings.delivery {
        EmailDeliveryMode::Disabled => Ok(EmailDelivery::Disabled(RecordingEmailClient::new())),
        EmailDeliveryMode::Enabled => {
            let http_client = reqwest::Client::builder()
                .timeout(settings.timeout())
                .build()?;

            let sender = Email::try_from(Secret::new(settings.sender.clone()))?;

            Ok(EmailDelivery::Enabled(PostmarkEmailClient::new(
                settings.base_url.clone(),
                sender,
                settings.auth_token.clone(),
                http_client,
            )))
        }
    }
}
