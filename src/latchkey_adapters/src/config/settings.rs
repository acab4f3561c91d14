use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use latchkey_application::MagicLinkSettings;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::auth_validation::JwtSessionConfig;

use super::constants::{
    DEFAULT_CONFIG_FILE, LOGIN_TOKEN_TTL_SECONDS, SESSION_TTL_SECONDS, env, prod,
};

/// Process-wide configuration, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub app_address: String,
    pub redis: RedisSettings,
    pub auth: AuthSettings,
    pub magic_link: MagicLinkUrlSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
    pub port: u16,
}

impl RedisSettings {
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host_name, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub session: SessionSettings,
    pub login_token: LoginTokenSettings,
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub secret: Secret<String>,
    pub time_to_live: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginTokenSettings {
    pub time_to_live: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MagicLinkUrlSettings {
    pub verify_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailDeliveryMode {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub delivery: EmailDeliveryMode,
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// CORS allow-list. A `*` entry admits every origin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn any() -> Self {
        Self(vec!["*".to_string()])
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        let Ok(origin) = origin.to_str() else {
            return false;
        };
        self.0
            .iter()
            .any(|allowed| allowed == "*" || allowed.trim_end_matches('/') == origin)
    }
}

impl AuthServiceSetting {
    /// Load settings from defaults, the optional settings file, `LATCHKEY__*`
    /// environment variables and finally the legacy `SECRET_KEY`,
    /// `REDIS_HOST` and `REDIS_PORT` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_file = std::env::var(env::CONFIG_FILE_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let builder = Self::defaults()?
            .add_source(File::with_name(&config_file).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_origins"),
            )
            .set_override_option(
                "auth.session.secret",
                std::env::var(env::SECRET_KEY_ENV_VAR).ok(),
            )?
            .set_override_option("redis.host_name", std::env::var(env::REDIS_HOST_ENV_VAR).ok())?
            .set_override_option("redis.port", std::env::var(env::REDIS_PORT_ENV_VAR).ok())?;

        Self::from_builder(builder)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app_address", prod::APP_ADDRESS)?
            .set_default("redis.host_name", prod::redis::HOST_NAME)?
            .set_default("redis.port", prod::redis::PORT)?
            .set_default("auth.session.time_to_live", SESSION_TTL_SECONDS)?
            .set_default("auth.login_token.time_to_live", LOGIN_TOKEN_TTL_SECONDS)?
            .set_default("auth.allowed_origins", vec!["*"])?
            .set_default("magic_link.verify_url", prod::VERIFY_URL)?
            .set_default("email_client.delivery", "disabled")?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", prod::email_client::SENDER)?
            .set_default("email_client.auth_token", "")?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT_IN_MILLIS,
            )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.session.secret.expose_secret().is_empty() {
            return Err(ConfigError::Message(
                "auth.session.secret must not be empty".to_string(),
            ));
        }
        if self.auth.session.time_to_live <= 0 {
            return Err(ConfigError::Message(
                "auth.session.time_to_live must be positive".to_string(),
            ));
        }
        if self.auth.login_token.time_to_live == 0 {
            return Err(ConfigError::Message(
                "auth.login_token.time_to_live must be positive".to_string(),
            ));
        }
        if self.email_client.delivery == EmailDeliveryMode::Enabled
            && self.email_client.auth_token.expose_secret().is_empty()
        {
            return Err(ConfigError::Message(
                "email_client.auth_token is required when delivery is enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn jwt_session_config(&self) -> JwtSessionConfig {
        JwtSessionConfig {
            secret: self.auth.session.secret.clone(),
            token_ttl_in_seconds: self.auth.session.time_to_live,
        }
    }

    pub fn magic_link_settings(&self) -> MagicLinkSettings {
        MagicLinkSettings {
            verify_url: self.magic_link.verify_url.clone(),
            token_ttl: Duration::from_secs(self.auth.login_token.time_to_live),
        }
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn settings_from(json: &str) -> Result<AuthServiceSetting, ConfigError> {
        let builder = AuthServiceSetting::defaults()
            .unwrap()
            .add_source(File::from_str(json, FileFormat::Json));
        AuthServiceSetting::from_builder(builder)
    }

    #[test]
    fn test_defaults_apply_when_only_secret_is_given() {
        let settings = settings_from(r#"{ "auth": { "session": { "secret": "s3cret" } } }"#)
            .unwrap();

        assert_eq!(settings.app_address, "0.0.0.0:8000");
        assert_eq!(settings.redis.url(), "redis://redis:6379/");
        assert_eq!(settings.auth.session.time_to_live, 1800);
        assert_eq!(settings.auth.login_token.time_to_live, 600);
        assert_eq!(settings.email_client.delivery, EmailDeliveryMode::Disabled);
        assert_eq!(settings.email_client.timeout(), Duration::from_secs(10));

        let magic_link = settings.magic_link_settings();
        assert_eq!(magic_link.verify_url, "http://localhost:8000/verify");
        assert_eq!(magic_link.token_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        assert!(settings_from("{}").is_err());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(settings_from(r#"{ "auth": { "session": { "secret": "" } } }"#).is_err());
    }

    #[test]
    fn test_enabled_delivery_requires_auth_token() {
        let result = settings_from(
            r#"{
                "auth": { "session": { "secret": "s3cret" } },
                "email_client": { "delivery": "enabled" }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let settings = settings_from(
            r#"{
                "app_address": "127.0.0.1:9000",
                "redis": { "host_name": "localhost", "port": 6380 },
                "auth": {
                    "session": { "secret": "s3cret", "time_to_live": 60 },
                    "allowed_origins": ["https://app.example.com"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.app_address, "127.0.0.1:9000");
        assert_eq!(settings.redis.url(), "redis://localhost:6380/");
        assert_eq!(settings.jwt_session_config().token_ttl_in_seconds, 60);
        assert!(
            settings
                .auth
                .allowed_origins
                .contains(&HeaderValue::from_static("https://app.example.com"))
        );
        assert!(
            !settings
                .auth
                .allowed_origins
                .contains(&HeaderValue::from_static("https://evil.example.com"))
        );
    }

    #[test]
    fn test_explicit_origins_match_exactly() {
        let origins = AllowedOrigins::new(vec![
            "https://app.example.com/".to_string(),
            "http://localhost:3000".to_string(),
        ]);

        assert!(origins.contains(&HeaderValue::from_static("https://app.example.com")));
        assert!(origins.contains(&HeaderValue::from_static("http://localhost:3000")));
        assert!(!origins.contains(&HeaderValue::from_static("http://localhost:3001")));
        assert!(!origins.contains(&HeaderValue::from_static("https://app.example.com.evil.io")));

        let nobody = AllowedOrigins::new(Vec::new());
        assert!(!nobody.contains(&HeaderValue::from_static("http://localhost:3000")));
    }

    #[test]
    fn test_wildcard_origin_allows_everything() {
        let origins = AllowedOrigins::any();
        assert!(origins.contains(&HeaderValue::from_static("http://localhost:3000")));
    }
}
