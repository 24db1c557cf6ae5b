// Router-level tests for the Tiergate API
// Run with: cargo test -p tiergate-server --test api_test
// Uses the in-memory storage backend, no database or running server needed.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::time::Duration;
use tiergate_server::{
    auth::{
        config::{JwtConfig, PasswordConfig},
        AuthConfig, AuthState, JwtService,
    },
    build_router,
    storage::StorageBackend,
};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret";

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            token_lifetime: Duration::from_secs(60),
        },
        // Small work factor keeps the suite fast
        password: PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        ..AuthConfig::default()
    }
}

fn test_app_with(config: AuthConfig) -> Router {
    let state = AuthState::new(config, StorageBackend::in_memory()).unwrap();
    build_router(state)
}

fn test_app() -> Router {
    test_app_with(test_config())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("jwtoken", token);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_form(app: &Router, method: Method, uri: &str, body: &'static str) -> Value {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn signup(app: &Router, email: &str, password: &str, is_premium: Option<bool>) -> Value {
    let mut body = json!({ "fullName": "A", "email": email, "password": password });
    if let Some(p) = is_premium {
        body["isPremium"] = json!(p);
    }
    send(app, Method::POST, "/signup", None, Some(body)).await.1
}

async fn login(app: &Router, email: &str, password: &str) -> Value {
    send(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
    .1
}

async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let response = login(app, email, password).await;
    assert_eq!(response["status"], "SUCCESS", "login failed: {}", response);
    response["jwToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_index() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "SUCCESS", "message": "Welcome" }));
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_signup_then_login() {
    let app = test_app();

    let response = signup(&app, "a@x.com", "p1", None).await;
    assert_eq!(response["status"], "SUCCESS");
    assert_eq!(response["message"], "You've signed up successfully");

    let response = login(&app, "a@x.com", "p1").await;
    assert_eq!(response["status"], "SUCCESS");
    assert_eq!(response["message"], "You've logged in successfully");
    assert_eq!(response["expiresIn"], 60);

    let token = response["jwToken"].as_str().unwrap();
    let claims = JwtService::new(test_config().jwt)
        .validate_session_token(token)
        .unwrap();
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.full_name, "A");
    assert!(!claims.is_premium);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = test_app();
    signup(&app, "a@x.com", "p1", None).await;

    let (status, response) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ "status": "FAILED", "message": "Invalid credentials" })
    );
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = test_app();
    let response = login(&app, "ghost@x.com", "p1").await;

    assert_eq!(response["status"], "FAILED");
    assert_eq!(response["message"], "User does not exist");
    assert!(response.get("jwToken").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = test_app();
    signup(&app, "a@x.com", "p1", None).await;

    let response = signup(&app, "a@x.com", "p2", None).await;
    assert_eq!(response["status"], "FAILED");
    assert_eq!(response["message"], "Email already registered");

    // The original credentials still work
    login_token(&app, "a@x.com", "p1").await;
}

#[tokio::test]
async fn test_signup_missing_field() {
    let app = test_app();
    let (status, response) = send(
        &app,
        Method::POST,
        "/signup",
        None,
        Some(json!({ "fullName": "A", "email": "a@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "FAILED");
    assert_eq!(response["message"], "Missing required field: password");
}

#[tokio::test]
async fn test_signup_accepts_lowercase_fullname() {
    let app = test_app();
    let (_, response) = send(
        &app,
        Method::POST,
        "/signup",
        None,
        Some(json!({ "fullname": "B", "email": "b@x.com", "password": "p1" })),
    )
    .await;

    assert_eq!(response["status"], "SUCCESS");
}

#[tokio::test]
async fn test_malformed_body() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "FAILED");
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_form_encoded_signup_and_login() {
    let app = test_app();

    let response = send_form(
        &app,
        Method::POST,
        "/signup",
        "fullname=A&email=a%40x.com&password=p1&isPremium=true",
    )
    .await;
    assert_eq!(
        response,
        json!({ "status": "SUCCESS", "message": "You've signed up successfully" })
    );

    let response = send_form(&app, Method::POST, "/login", "email=a%40x.com&password=p1").await;
    assert_eq!(response["status"], "SUCCESS");
    let token = response["jwToken"].as_str().unwrap();

    // The form-submitted tier made it into the token
    let (_, response) = send(&app, Method::GET, "/premium", Some(token), None).await;
    assert_eq!(response["status"], "SUCCESS");

    // JSON clients see the same account
    login_token(&app, "a@x.com", "p1").await;

    let response = send_form(&app, Method::POST, "/login", "email=a%40x.com&password=nope").await;
    assert_eq!(response["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_form_encoded_subscribe() {
    let app = test_app();
    signup(&app, "a@x.com", "p1", None).await;

    let response = send_form(
        &app,
        Method::PATCH,
        "/subscribePremium",
        "email=a%40x.com&isPremium=true",
    )
    .await;
    assert_eq!(response["status"], "SUCCESS");

    let token = login_token(&app, "a@x.com", "p1").await;
    let (_, response) = send(&app, Method::GET, "/premium", Some(&token), None).await;
    assert_eq!(response["status"], "SUCCESS");
}

#[tokio::test]
async fn test_unsupported_content_type() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/signup")
        .header("content-type", "text/plain")
        .body(Body::from("fullname=A&email=a%40x.com&password=p1"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({ "status": "FAILED", "message": "Invalid request body" })
    );
}

#[tokio::test]
async fn test_whitespace_password_is_kept_verbatim() {
    let app = test_app();

    let response = signup(&app, "a@x.com", "   ", None).await;
    assert_eq!(response["status"], "SUCCESS", "{}", response);
    login_token(&app, "a@x.com", "   ").await;

    // Whitespace is significant, so a trimmed or empty attempt does not match
    let response = login(&app, "a@x.com", " ").await;
    assert_eq!(response["message"], "Invalid credentials");
    let response = login(&app, "a@x.com", "").await;
    assert_eq!(response["message"], "Missing required field: password");

    // Name and email must still carry content
    let (_, response) = send(
        &app,
        Method::POST,
        "/signup",
        None,
        Some(json!({ "fullName": "  ", "email": "b@x.com", "password": "p1" })),
    )
    .await;
    assert_eq!(response["message"], "Missing required field: fullName");
}

#[tokio::test]
async fn test_dashboard_requires_login() {
    let app = test_app();

    let (_, response) = send(&app, Method::GET, "/dashboard", None, None).await;
    assert_eq!(
        response,
        json!({ "status": "FAILED", "message": "You're not logged in" })
    );

    let (_, response) = send(&app, Method::GET, "/dashboard", Some("garbage"), None).await;
    assert_eq!(response["message"], "You're not logged in");

    signup(&app, "a@x.com", "p1", None).await;
    let token = login_token(&app, "a@x.com", "p1").await;

    let (_, response) = send(&app, Method::GET, "/dashboard", Some(&token), None).await;
    assert_eq!(
        response,
        json!({ "status": "SUCCESS", "message": "Welcome to dashboard!" })
    );
}

#[tokio::test]
async fn test_dashboard_rejects_foreign_token() {
    let app = test_app();
    signup(&app, "a@x.com", "p1", None).await;

    // A token from another deployment (different secret) must not be accepted
    let other_app = test_app_with(AuthConfig {
        jwt: JwtConfig {
            secret: "other-secret".to_string(),
            token_lifetime: Duration::from_secs(60),
        },
        ..test_config()
    });
    signup(&other_app, "a@x.com", "p1", None).await;
    let foreign = login_token(&other_app, "a@x.com", "p1").await;

    let (_, response) = send(&app, Method::GET, "/dashboard", Some(&foreign), None).await;
    assert_eq!(response["message"], "You're not logged in");
}

#[tokio::test]
async fn test_premium_requires_premium_tier() {
    let app = test_app();

    let (_, response) = send(&app, Method::GET, "/premium", None, None).await;
    assert_eq!(response["message"], "You're not logged in");

    signup(&app, "free@x.com", "p1", None).await;
    let token = login_token(&app, "free@x.com", "p1").await;
    let (_, response) = send(&app, Method::GET, "/premium", Some(&token), None).await;
    assert_eq!(
        response,
        json!({
            "status": "FAILED",
            "message": "You're not a Premium user! Buy a premium plan"
        })
    );

    signup(&app, "vip@x.com", "p1", Some(true)).await;
    let token = login_token(&app, "vip@x.com", "p1").await;
    let (_, response) = send(&app, Method::GET, "/premium", Some(&token), None).await;
    assert_eq!(
        response,
        json!({ "status": "SUCCESS", "message": "Welcome to Premium page!" })
    );
}

#[tokio::test]
async fn test_subscribe_premium_flow() {
    let app = test_app();
    signup(&app, "a@x.com", "p1", None).await;
    let old_token = login_token(&app, "a@x.com", "p1").await;

    let (_, response) = send(
        &app,
        Method::PATCH,
        "/subscribePremium",
        None,
        Some(json!({ "email": "a@x.com", "isPremium": true })),
    )
    .await;
    assert_eq!(
        response,
        json!({ "status": "SUCCESS", "message": "You've subscribed successfully" })
    );

    // Tokens carry the tier they were issued with
    let (_, response) = send(&app, Method::GET, "/premium", Some(&old_token), None).await;
    assert_eq!(response["status"], "FAILED");

    let new_token = login_token(&app, "a@x.com", "p1").await;
    let (_, response) = send(&app, Method::GET, "/premium", Some(&new_token), None).await;
    assert_eq!(response["status"], "SUCCESS");
}

#[tokio::test]
async fn test_subscribe_premium_unknown_user() {
    let app = test_app();
    let (_, response) = send(
        &app,
        Method::PATCH,
        "/subscribePremium",
        None,
        Some(json!({ "email": "ghost@x.com", "isPremium": true })),
    )
    .await;

    assert_eq!(response["status"], "FAILED");
    assert_eq!(response["message"], "User does not exist");
}

#[tokio::test]
async fn test_subscribe_premium_missing_tier() {
    let app = test_app();
    signup(&app, "a@x.com", "p1", None).await;

    let (_, response) = send(
        &app,
        Method::PATCH,
        "/subscribePremium",
        None,
        Some(json!({ "email": "a@x.com" })),
    )
    .await;

    assert_eq!(response["message"], "Missing required field: isPremium");
}

#[tokio::test]
async fn test_protected_subscribe() {
    let app = test_app_with(AuthConfig {
        protect_subscribe: true,
        ..test_config()
    });
    signup(&app, "a@x.com", "p1", None).await;
    signup(&app, "b@x.com", "p1", None).await;
    let body = json!({ "email": "a@x.com", "isPremium": true });

    // Anonymous callers are turned away
    let (_, response) = send(
        &app,
        Method::PATCH,
        "/subscribePremium",
        None,
        Some(body.clone()),
    )
    .await;
    assert_eq!(response["message"], "You're not logged in");

    // Another user cannot change a's tier
    let b_token = login_token(&app, "b@x.com", "p1").await;
    let (_, response) = send(
        &app,
        Method::PATCH,
        "/subscribePremium",
        Some(&b_token),
        Some(body.clone()),
    )
    .await;
    assert_eq!(
        response["message"],
        "You can only change your own subscription"
    );

    // a can change their own
    let a_token = login_token(&app, "a@x.com", "p1").await;
    let (_, response) = send(
        &app,
        Method::PATCH,
        "/subscribePremium",
        Some(&a_token),
        Some(body),
    )
    .await;
    assert_eq!(response["status"], "SUCCESS");
}

#[tokio::test]
async fn test_openapi_served() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api-doc/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Tiergate API");
}
