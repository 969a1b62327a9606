//! Session endpoints against an in-memory workspace.
//! Run with: `cargo test -p server --features server --test auth_tests`

#![cfg(feature = "server")]

mod common;

use axum::http::StatusCode;
use common::{app_for, get, login, owner, post, sarah, send, test_app, test_state};
use pretty_assertions::assert_eq;
use serde_json::json;
use server::rate_limit::RateLimitState;
use std::time::Duration;

#[tokio::test]
async fn login_sets_http_only_session_cookie() {
    let app = test_app();
    let (status, body, cookies) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "  Sarah@Workforce.com " })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Sarah Chen");
    assert_eq!(body["user"]["role"], "EMPLOYEE");
    assert!(body["user"].get("passwordHash").is_none());
    let cookie = cookies.iter().find(|c| c.starts_with("workforce_session=")).unwrap();
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn unknown_email_is_provisioned_as_staff() {
    let app = test_app();
    let token = login(&app, "priya.k-nair@workforce.com").await;
    let (status, me) = get(&app, "/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "Priya K Nair");
    assert_eq!(me["designation"], "Staff Member");
    assert_eq!(me["avatar"], "https://picsum.photos/seed/priya.k-nair/200");
}

#[tokio::test]
async fn blank_email_is_rejected() {
    let app = test_app();
    let (status, body, _) =
        send(&app, "POST", "/api/auth/login", Some(json!({ "email": "  " })), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide a valid workspace identity.");
}

#[tokio::test]
async fn me_requires_a_session() {
    let app = test_app();
    let (status, _, _) = send(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, cookies) = send(&app, "GET", "/api/auth/me", None, Some("bogus")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(cookies.iter().any(|c| c.starts_with("workforce_session=;")));
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = test_app();
    let token = sarah(&app).await;
    let (status, _, cookies) = send(&app, "POST", "/api/auth/logout", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(cookies.iter().any(|c| c.contains("Max-Age=0")));

    let (status, _) = get(&app, "/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn disabled_member_cannot_sign_in_and_loses_session() {
    let app = test_app();
    let boss = owner(&app).await;
    let token = sarah(&app).await;

    let (status, user) = common::patch(&app, "/api/users/2/status", json!({ "status": "DISABLED" }), &boss).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["status"], "DISABLED");

    let (status, _) = get(&app, "/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "sarah@workforce.com" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Account access denied by administrator.");
}

#[tokio::test]
async fn owner_can_switch_into_an_employee() {
    let app = test_app();
    let boss = owner(&app).await;
    let (status, user) = post(&app, "/api/auth/switch", json!({ "userId": "3" }), &boss).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Marcus Miller");

    let (_, me) = get(&app, "/api/auth/me", &boss).await;
    assert_eq!(me["id"], "3");

    // The session now belongs to an employee, who cannot switch.
    let (status, _) = post(&app, "/api/auth/switch", json!({ "userId": "1" }), &boss).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_is_rate_limited_per_client() {
    let app = app_for(test_state(), RateLimitState::new(2, Duration::from_secs(60)));
    let body = json!({ "email": "sarah@workforce.com" });

    for _ in 0..2 {
        let (status, _, _) = send(&app, "POST", "/api/auth/login", Some(body.clone()), None).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, json, _) = send(&app, "POST", "/api/auth/login", Some(body), None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["kind"], "RateLimited");
}
