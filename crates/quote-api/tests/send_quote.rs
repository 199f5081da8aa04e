//! # Integration Tests for quote-api
//!
//! Tests the send-quote endpoint end to end: form-type dispatch, body
//! decoding, server-side validation, sanitisation of the delivered email,
//! delivery failures, per-IP rate limiting, and the health probes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tower::ServiceExt;

use quote_api::mailer::{Envelope, MailError, Mailer};
use quote_api::middleware::rate_limit::RateLimitConfig;
use quote_api::state::{AppConfig, AppState};

/// Mailer that keeps every envelope it is given.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<Envelope>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, envelope: &Envelope) -> Result<String, MailError> {
        let mut sent = self.sent.lock();
        sent.push(envelope.clone());
        Ok(format!("email-{}", sent.len()))
    }
}

/// Mailer whose provider always refuses.
struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _envelope: &Envelope) -> Result<String, MailError> {
        Err(MailError::Rejected {
            status: 403,
            body: "invalid api key".into(),
        })
    }
}

/// Helper: build the test app around `mailer` with default limits.
fn test_app(mailer: Arc<dyn Mailer>) -> axum::Router {
    quote_api::app(AppState::with_mailer(AppConfig::default(), mailer))
}

/// Helper: a POST to the quote endpoint.
fn post_quote(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/send-quote")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.7")
        .body(body.into())
        .unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn guided_body() -> serde_json::Value {
    serde_json::json!({
        "formType": "guided",
        "name": "<b>Alice</b>",
        "email": "alice@example.com",
        "company": "",
        "projectType": "webapp",
        "projectDescription": "A booking dashboard for our clinic",
        "features": ["User authentication", "Other: SMS reminders"],
        "timeline": "1month",
        "budget": "5k-10k"
    })
}

fn technical_body() -> serde_json::Value {
    serde_json::json!({
        "formType": "technical",
        "contactName": "Bob",
        "contactEmail": "bob@example.com",
        "projectName": "Inventory",
        "projectType": "desktop",
        "projectDescription": "Offline-first stock tracking",
        "features": "Barcode scanning, CSV export",
        "timeline": "flexible",
        "budget": "10k-25k"
    })
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let app = test_app(Arc::new(RecordingMailer::default()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let app = test_app(Arc::new(RecordingMailer::default()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Successful Delivery ------------------------------------------------------

#[tokio::test]
async fn test_guided_request_is_delivered_sanitised() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = test_app(mailer.clone());

    let response = app
        .oneshot(post_quote(guided_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], "email-1");

    let sent = mailer.sent.lock();
    assert_eq!(sent.len(), 1);
    let envelope = &sent[0];
    assert_eq!(envelope.to, "luka@sunny-stack.com");
    assert_eq!(envelope.from, "Sunny Stack Forms <forms@sunny-stack.com>");
    assert_eq!(envelope.message.subject, "New Project Request from Alice");
    assert_eq!(envelope.message.reply_to, "alice@example.com");
    assert!(envelope.message.html.contains("<li>Other: SMS reminders</li>"));
    assert!(!envelope.message.html.contains("<b>Alice</b>"));
}

#[tokio::test]
async fn test_technical_request_is_delivered() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = test_app(mailer.clone());

    let response = app
        .oneshot(post_quote(technical_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sent = mailer.sent.lock();
    assert_eq!(sent[0].message.subject, "Technical Requirements from Bob");
    assert!(sent[0].message.html.contains("Desktop Application"));
}

// -- Rejections ---------------------------------------------------------------

#[tokio::test]
async fn test_unknown_form_type_is_rejected() {
    let app = test_app(Arc::new(RecordingMailer::default()));
    let response = app
        .oneshot(post_quote(r#"{"formType":"express","name":"x"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid form type");
    assert_eq!(
        body["details"],
        r#"Form type must be either "guided" or "technical""#
    );
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = test_app(Arc::new(RecordingMailer::default()));
    let response = app.oneshot(post_quote("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_wrong_field_shape_is_rejected() {
    let app = test_app(Arc::new(RecordingMailer::default()));
    let response = app
        .oneshot(post_quote(r#"{"formType":"guided","features":"everything"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid request body");
}

#[tokio::test]
async fn test_validation_errors_are_listed() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = test_app(mailer.clone());

    let mut body = guided_body();
    body["email"] = "not-an-email".into();
    body["budget"] = "".into();
    body["company"] = "c".repeat(51).into();

    let response = app.oneshot(post_quote(body.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["details"],
        "Please check the following fields and try again:"
    );

    let errors = body["validationErrors"].as_array().unwrap();
    let find = |field: &str| {
        errors
            .iter()
            .find(|e| e["field"] == field)
            .map(|e| e["message"].as_str().unwrap().to_string())
    };
    assert_eq!(
        find("email").as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(find("budget").as_deref(), Some("Budget is required"));
    assert_eq!(
        find("company").as_deref(),
        Some("Company must be 50 characters or less")
    );
    let order: Vec<_> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(order, vec!["budget", "email", "company"]);
    assert!(mailer.sent.lock().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_is_500() {
    let app = test_app(Arc::new(FailingMailer));
    let response = app
        .oneshot(post_quote(guided_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to send email");
    assert!(body.get("details").is_none());
}

// -- Rate Limiting ------------------------------------------------------------

#[tokio::test]
async fn test_rate_limit_per_ip() {
    let config = AppConfig {
        mail_to: "ops@example.com".into(),
        rate_limit: RateLimitConfig {
            per_minute: 2,
            per_hour: 100,
        },
        ..AppConfig::default()
    };
    let app = quote_api::app(AppState::with_mailer(
        config,
        Arc::new(RecordingMailer::default()),
    ));

    // Invalid requests still count against the limit.
    for _ in 0..2 {
        let response = app.clone().oneshot(post_quote("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app.clone().oneshot(post_quote("{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Too many requests. Please email directly at ops@example.com"
    );

    // A different client is unaffected.
    let other = Request::builder()
        .method("POST")
        .uri("/api/send-quote")
        .header("content-type", "application/json")
        .header("x-real-ip", "198.51.100.1")
        .body(Body::from(guided_body().to_string()))
        .unwrap();
    let response = app.oneshot(other).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let config = AppConfig {
        rate_limit: RateLimitConfig {
            per_minute: 1,
            per_hour: 1,
        },
        ..AppConfig::default()
    };
    let app = quote_api::app(AppState::with_mailer(
        config,
        Arc::new(RecordingMailer::default()),
    ));
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health/liveness")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
