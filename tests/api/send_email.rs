use crate::helpers::{
    application_settings, spawn_app, spawn_app_from, spawn_app_with_failing_relay, valid_body,
};
use contact_relay::configuration::ApplicationSettings;
use contact_relay::domain::rate_limit::RateLimiter;
use lettre::transport::stub::AsyncStubTransport;

#[tokio::test]
async fn send_email_returns_a_200_for_valid_form_data() {
    let app = spawn_app().await;

    let response = app.post_send_email(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "message": "Email sent successfully" })
    );
}

#[tokio::test]
async fn send_email_relays_the_labelled_fields() {
    let app = spawn_app().await;

    app.post_send_email(&valid_body()).await;

    let messages = app.sent_messages().await;
    assert_eq!(messages.len(), 1);
    let (envelope, raw) = &messages[0];
    assert_eq!(envelope.to()[0].to_string(), "owner@example.com");
    assert!(raw.contains("Subject: New Message from Website"));
    assert!(raw.contains("Name: Jane Doe"));
    assert!(raw.contains("Email: jane@example.com"));
    assert!(raw.contains("Message: Hello"));
}

#[tokio::test]
async fn send_email_trims_name_and_message() {
    let app = spawn_app().await;
    let body = serde_json::json!({
        "fullName": "   Jane Doe  ",
        "email": "jane@example.com",
        "message": "\n Hello \n"
    });

    let response = app.post_send_email(&body).await;

    assert_eq!(200, response.status().as_u16());
    let messages = app.sent_messages().await;
    let raw = &messages[0].1;
    assert!(raw.contains("Name: Jane Doe"));
    assert!(!raw.contains("Name:    Jane Doe"));
    assert!(raw.contains("Message: Hello"));
}

#[tokio::test]
async fn send_email_returns_a_400_when_a_field_is_missing() {
    let app = spawn_app().await;
    let test_cases = vec![
        (
            serde_json::json!({"email": "jane@example.com", "message": "Hello"}),
            "fullName",
            "missing the full name",
        ),
        (
            serde_json::json!({"fullName": "Jane Doe", "message": "Hello"}),
            "email",
            "missing the email",
        ),
        (
            serde_json::json!({"fullName": "Jane Doe", "email": "jane@example.com"}),
            "message",
            "missing the message",
        ),
        (
            serde_json::json!({"fullName": "  ", "email": "jane@example.com", "message": "Hello"}),
            "fullName",
            "a whitespace-only full name",
        ),
        (
            serde_json::json!({"fullName": "Jane Doe", "email": "jane@example.com", "message": "\t\n"}),
            "message",
            "a whitespace-only message",
        ),
    ];

    for (invalid_body, field, description) in test_cases {
        let response = app.post_send_email(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1, "Unexpected errors for {}", description);
        assert_eq!(errors[0]["field"], field);
    }
    assert!(app.sent_messages().await.is_empty());
}

#[tokio::test]
async fn send_email_returns_a_400_for_an_invalid_email() {
    let app = spawn_app().await;
    let body = serde_json::json!({
        "fullName": "Jane Doe",
        "email": "not-an-email",
        "message": "Hello"
    });

    let response = app.post_send_email(&body).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "errors": [{ "field": "email", "message": "Valid email is required" }]
        })
    );
    assert!(app.sent_messages().await.is_empty());
}

#[tokio::test]
async fn send_email_lists_every_failed_field_in_form_order() {
    let app = spawn_app().await;

    let response = app.post_send_email(&serde_json::json!({})).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["fullName", "email", "message"]);
}

#[tokio::test]
async fn send_email_returns_a_400_for_malformed_json() {
    let app = spawn_app().await;

    let response = app.post_send_email_raw("{\"fullName\": ".into()).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "body");
}

#[tokio::test]
async fn send_email_returns_a_400_for_an_oversized_body() {
    let settings = ApplicationSettings {
        max_payload_bytes: 32_768,
        ..application_settings()
    };
    let app = spawn_app_from(AsyncStubTransport::new_ok(), RateLimiter::default(), settings).await;
    let body = serde_json::json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "message": "a".repeat(40_000)
    });

    let response = app.post_send_email(&body).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "body");
    assert!(app.sent_messages().await.is_empty());
}

#[tokio::test]
async fn send_email_accepts_a_maximal_message_of_joined_emoji() {
    let app = spawn_app().await;
    let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}";
    let body = serde_json::json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "message": family.repeat(5_000)
    });

    let response = app.post_send_email(&body).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.sent_messages().await.len(), 1);
}

#[tokio::test]
async fn send_email_returns_a_400_for_an_overlong_message() {
    let app = spawn_app().await;
    let body = serde_json::json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "message": "a".repeat(5_001)
    });

    let response = app.post_send_email(&body).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "message");
}

#[tokio::test]
async fn send_email_returns_a_500_if_the_relay_fails() {
    let app = spawn_app_with_failing_relay().await;

    let response = app.post_send_email(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Failed to send email" }));
}

#[tokio::test]
async fn identical_submissions_send_two_emails() {
    let app = spawn_app().await;

    app.post_send_email(&valid_body()).await;
    app.post_send_email(&valid_body()).await;

    assert_eq!(app.sent_messages().await.len(), 2);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = spawn_app().await;

    let response = app.post_send_email(&valid_body()).await;

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
}

#[tokio::test]
async fn cross_origin_preflight_is_allowed() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/send-email", &app.address),
        )
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn only_post_is_routed() {
    let app = spawn_app().await;

    let response = reqwest::get(&format!("{}/send-email", &app.address))
        .await
        .unwrap();

    assert!(matches!(response.status().as_u16(), 404 | 405));
    assert!(app.sent_messages().await.is_empty());
}
