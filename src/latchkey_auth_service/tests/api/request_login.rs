use crate::helpers::{ErrorBody, MessageBody, TestApp, get_random_email};

#[tokio::test]
async fn should_return_200_and_send_magic_link() {
    let app = TestApp::new().await;
    let email = get_random_email();

    let response = app
        .post_request_login(&serde_json::json!({ "email": email }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: MessageBody = response.json().await.unwrap();
    assert_eq!(body.message, "Magic link sent to your email");

    let sent = app.email_client.sent_emails().await;
    assert_eq!(sent.len(), 1);
    let message = &sent[0].message;
    let link_prefix = format!("{}/verify?token=", app.address);
    assert_eq!(message.subject, "Your Magic Login Link");
    assert!(message.html_body.contains(&link_prefix));
    assert!(message.text_body.contains(&link_prefix));
    assert!(!message.text_body.contains('<'));
    assert!(message.text_body.contains("expire in 10 minutes"));
    assert_eq!(app.login_token_store.len().await, 1);
}

#[tokio::test]
async fn should_issue_distinct_tokens_for_repeated_requests() {
    let app = TestApp::new().await;
    let email = get_random_email();

    app.post_request_login(&serde_json::json!({ "email": email }))
        .await;
    let first = app.magic_link_token_for(&email).await;
    app.post_request_login(&serde_json::json!({ "email": email }))
        .await;
    let second = app.magic_link_token_for(&email).await;

    assert_ne!(first, second);
    assert_eq!(first.len(), 43);
    assert_eq!(app.login_token_store.len().await, 2);
}

#[tokio::test]
async fn should_return_422_for_invalid_email() {
    let app = TestApp::new().await;

    let inputs = ["", "not-an-email", "missing-domain@", "@example.com", "a b@c.com"];

    for input in inputs {
        let response = app
            .post_request_login(&serde_json::json!({ "email": input }))
            .await;

        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {input:?}"
        );
        let body: ErrorBody = response.json().await.unwrap();
        assert!(body.error.starts_with("Invalid input"));
    }

    assert!(app.email_client.sent_emails().await.is_empty());
    assert!(app.login_token_store.is_empty().await);
}

#[tokio::test]
async fn should_return_422_if_email_field_is_missing() {
    let app = TestApp::new().await;

    let response = app
        .post_request_login(&serde_json::json!({ "address": "alice@example.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 422);
}
