use crate::helpers::{ErrorBody, TestApp, VerifyBody, get_random_email};

#[tokio::test]
async fn should_exchange_token_for_bearer_credential() {
    let app = TestApp::new().await;
    let email = get_random_email();

    app.post_request_login(&serde_json::json!({ "email": email }))
        .await;
    let token = app.magic_link_token_for(&email).await;

    let response = app.get_verify(&token).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: VerifyBody = response.json().await.unwrap();
    assert_eq!(body.token_type, "bearer");
    assert_eq!(body.expires_in, 1800);
    assert_eq!(body.access_token.split('.').count(), 3);
    assert!(app.login_token_store.is_empty().await);
}

#[tokio::test]
async fn should_reject_second_redemption() {
    let app = TestApp::new().await;
    let email = get_random_email();

    app.post_request_login(&serde_json::json!({ "email": email }))
        .await;
    let token = app.magic_link_token_for(&email).await;

    assert_eq!(app.get_verify(&token).await.status().as_u16(), 200);

    let response = app.get_verify(&token).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Invalid or expired token");
}

#[tokio::test]
async fn should_return_400_for_unknown_token() {
    let app = TestApp::new().await;

    let response = app.get_verify("never-issued").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Invalid or expired token");
}

#[tokio::test]
async fn should_keep_tokens_independent() {
    let app = TestApp::new().await;
    let email = get_random_email();

    app.post_request_login(&serde_json::json!({ "email": email }))
        .await;
    let first = app.magic_link_token_for(&email).await;
    app.post_request_login(&serde_json::json!({ "email": email }))
        .await;
    let second = app.magic_link_token_for(&email).await;

    assert_eq!(app.get_verify(&second).await.status().as_u16(), 200);
    assert_eq!(app.get_verify(&first).await.status().as_u16(), 200);
}

#[tokio::test]
async fn should_allow_only_one_concurrent_redemption() {
    let app = TestApp::new().await;
    let email = get_random_email();

    app.post_request_login(&serde_json::json!({ "email": email }))
        .await;
    let token = app.magic_link_token_for(&email).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = app.http_client.clone();
        let url = format!("{}/verify", app.address);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            client
                .get(url)
                .query(&[("token", token)])
                .send()
                .await
                .expect("Failed to execute request.")
                .status()
                .as_u16()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == 400).count(), 7);
}
