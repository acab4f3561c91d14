use latchkey_adapters::auth_validation::JwtSessionSigner;
use latchkey_core::{Email, SessionIssuer};
use secrecy::Secret;

use crate::helpers::{ErrorBody, MessageBody, TestApp, get_random_email, session_config};

#[tokio::test]
async fn should_greet_authenticated_user() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let credential = app.log_in(&email).await;

    let response = app
        .get_protected(Some(&format!("Bearer {credential}")))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: MessageBody = response.json().await.unwrap();
    assert_eq!(
        body.message,
        format!("Hello {email}! This is a protected route.")
    );
}

#[tokio::test]
async fn should_return_401_without_authorization_header() {
    let app = TestApp::new().await;

    let response = app.get_protected(None).await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Not authenticated");
}

#[tokio::test]
async fn should_return_401_not_authenticated_for_other_schemes() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let credential = app.log_in(&email).await;

    let headers = [
        "Basic dXNlcjpwYXNz".to_owned(),
        format!("Token {credential}"),
        credential.clone(),
    ];

    for header in headers {
        let response = app.get_protected(Some(&header)).await;

        assert_eq!(response.status().as_u16(), 401, "Failed for header: {header:?}");
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "Not authenticated");
    }
}

#[tokio::test]
async fn should_return_401_for_invalid_credentials() {
    let app = TestApp::new().await;

    let other_key = JwtSessionSigner::new(latchkey_adapters::auth_validation::JwtSessionConfig {
        secret: Secret::from("some-other-key".to_owned()),
        ..session_config()
    });
    let email = Email::try_from(Secret::from(get_random_email())).unwrap();
    let foreign = other_key.issue(&email).unwrap();

    let headers = [
        "Bearer invalid_token".to_owned(),
        format!("Bearer {}", foreign.token()),
    ];

    for header in headers {
        let response = app.get_protected(Some(&header)).await;

        assert_eq!(response.status().as_u16(), 401, "Failed for header: {header:?}");
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "Invalid token");
    }
}

#[tokio::test]
async fn should_accept_credential_minted_with_the_shared_key() {
    let app = TestApp::new().await;
    let signer = JwtSessionSigner::new(session_config());
    let email = Email::try_from(Secret::from("dave@example.com".to_owned())).unwrap();
    let credential = signer.issue(&email).unwrap();

    let response = app
        .get_protected(Some(&format!("Bearer {}", credential.token())))
        .await;

    assert_eq!(response.status().as_u16(), 200);
}
