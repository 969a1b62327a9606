use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware, Router,
};
use serde_json::Value;
use server::rate_limit::RateLimitState;
use server::state::AppState;
use server::store::Workforce;
use shared_types::ShiftConfig;
use std::time::Duration;
use tower::ServiceExt;

/// A fresh seeded workspace with no external integrations.
pub fn test_state() -> AppState {
    AppState::new(Workforce::seeded(&ShiftConfig::default()).shared(), None, None)
}

/// The REST API with the session middleware, as the app mounts it.
pub fn app_for(state: AppState, login_limit: RateLimitState) -> Router {
    server::openapi::api_router(state.clone(), login_limit).layer(middleware::from_fn_with_state(
        state.workforce.clone(),
        server::auth::middleware::session_middleware,
    ))
}

#[allow(dead_code)]
pub fn test_app() -> Router {
    app_for(test_state(), RateLimitState::new(1000, Duration::from_secs(60)))
}

/// Send a request with an optional JSON body and Bearer token; returns
/// (status, parsed body or `Null`, raw Set-Cookie values).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value, Vec<String>) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json, cookies)
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let (status, json, _) = send(app, "GET", uri, None, Some(token)).await;
    (status, json)
}

#[allow(dead_code)]
pub async fn post(app: &Router, uri: &str, body: Value, token: &str) -> (StatusCode, Value) {
    let (status, json, _) = send(app, "POST", uri, Some(body), Some(token)).await;
    (status, json)
}

#[allow(dead_code)]
pub async fn patch(app: &Router, uri: &str, body: Value, token: &str) -> (StatusCode, Value) {
    let (status, json, _) = send(app, "PATCH", uri, Some(body), Some(token)).await;
    (status, json)
}

#[allow(dead_code)]
pub async fn put(app: &Router, uri: &str, body: Value, token: &str) -> (StatusCode, Value) {
    let (status, json, _) = send(app, "PUT", uri, Some(body), Some(token)).await;
    (status, json)
}

#[allow(dead_code)]
pub async fn delete(app: &Router, uri: &str, token: &str) -> StatusCode {
    send(app, "DELETE", uri, None, Some(token)).await.0
}

/// Sign in by email and return the session token.
pub async fn login(app: &Router, email: &str) -> String {
    let (status, json, _) = send(
        app,
        "POST",
        "/api/auth/login",
        Some(serde_json::json!({ "email": email })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {json}");
    json["token"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub async fn owner(app: &Router) -> String {
    login(app, "owner@workforce.com").await
}

#[allow(dead_code)]
pub async fn sarah(app: &Router) -> String {
    login(app, "sarah@workforce.com").await
}
