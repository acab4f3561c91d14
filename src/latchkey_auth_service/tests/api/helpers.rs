use std::time::Duration;

use latchkey_adapters::{
    auth_validation::{JwtSessionConfig, JwtSessionSigner},
    config::{self, AllowedOrigins},
    email::RecordingEmailClient,
    persistence::HashMapLoginTokenStore,
};
use latchkey_application::MagicLinkSettings;
use latchkey_auth_service::AuthService;
use latchkey_core::Email;
use secrecy::Secret;
use serde::Deserialize;

pub const TEST_SECRET: &str = "test-signing-key";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub email_client: RecordingEmailClient,
    pub login_token_store: HashMapLoginTokenStore,
}

#[derive(Debug, Deserialize)]
pub struct VerifyBody {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn session_config() -> JwtSessionConfig {
    JwtSessionConfig {
        secret: Secret::from(TEST_SECRET.to_owned()),
        token_ttl_in_seconds: 1800,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let listener = tokio::net::TcpListener::bind(config::test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let login_token_store = HashMapLoginTokenStore::new();
        let email_client = RecordingEmailClient::new();
        let magic_link = MagicLinkSettings {
            verify_url: format!("{address}/verify"),
            token_ttl: Duration::from_secs(600),
        };

        let auth_service = AuthService::new(
            login_token_store.clone(),
            email_client.clone(),
            JwtSessionSigner::new(session_config()),
            magic_link,
        );

        tokio::spawn(auth_service.run_standalone(listener, Some(AllowedOrigins::any())));

        Self {
            address,
            http_client: reqwest::Client::new(),
            email_client,
            login_token_store,
        }
    }

    pub async fn post_request_login<Body: serde::Serialize>(
        &self,
        body: &Body,
    ) -> reqwest::Response {
        self.http_client
            .post(format!("{}/request-login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_verify(&self, token: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/verify", &self.address))
            .query(&[("token", token)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_protected(&self, authorization: Option<&str>) -> reqwest::Response {
        let mut request = self
            .http_client
            .get(format!("{}/protected", &self.address));
        if let Some(authorization) = authorization {
            request = request.header("Authorization", authorization);
        }
        request.send().await.expect("Failed to execute request.")
    }

    /// Pull the login token out of the last magic link mailed to `email`.
    pub async fn magic_link_token_for(&self, email: &str) -> String {
        let recipient = Email::try_from(Secret::from(email.to_owned())).unwrap();
        let sent = self
            .email_client
            .last_sent_to(&recipient)
            .await
            .expect("No magic link was sent");

        let body = &sent.message.text_body;
        let start = body.find("?token=").expect("Link has no token") + "?token=".len();
        let rest = &body[start..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest[..end].to_owned()
    }

    /// Run the full login flow and return the session credential.
    pub async fn log_in(&self, email: &str) -> String {
        let response = self
            .post_request_login(&serde_json::json!({ "email": email }))
            .await;
        assert_eq!(response.status().as_u16(), 200);

        let token = self.magic_link_token_for(email).await;
        let body: VerifyBody = self.get_verify(&token).await.json().await.unwrap();
        body.access_token
    }
}

pub fn get_random_email() -> String {
    format!("{}@example.com", uuid::Uuid::new_v4())
}
