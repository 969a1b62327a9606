use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, MockSheet};

#[tokio::test]
async fn every_sign_in_is_audited_without_the_password() {
    let sheet = MockSheet::default();
    let state = common::state_with(Some(sheet.start().await), None);
    let app = common::app(state);

    let (status, _) = common::request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({
            "email": "Sarah@Workforce.com",
            "password": "hunter22",
            "location": { "lat": 13.0827, "lng": 80.2707 }
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert!(common::eventually(|| !sheet.posts().is_empty()).await);
    let audit = &sheet.posts()[0];
    assert_eq!(audit["action"], "login");
    assert_eq!(audit["email"], "sarah@workforce.com");
    assert_eq!(audit["location"], "13.0827, 80.2707");
    assert!(audit["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(!audit.to_string().contains("hunter22"));
}

#[tokio::test]
async fn denied_location_and_failed_attempts_are_still_audited() {
    let sheet = MockSheet::default();
    let state = common::state_with(Some(sheet.start().await), None);
    state
        .workforce
        .write()
        .await
        .toggle_user_status("1", "3", shared_types::UserStatus::Disabled)
        .unwrap();
    let app = common::app(state);

    let (status, _) = common::request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "marcus@workforce.com" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert!(common::eventually(|| !sheet.posts().is_empty()).await);
    assert_eq!(sheet.posts()[0]["location"], "Permission Denied/Unknown");
}

#[tokio::test]
async fn sheet_outage_does_not_block_sign_in() {
    let sheet = MockSheet::default();
    sheet.fail_with(StatusCode::BAD_GATEWAY);
    let app = common::app(common::state_with(Some(sheet.start().await), None));

    let token = common::login(&app, "owner@workforce.com").await;
    let (status, me) = common::request(&app, "GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "OWNER");
}
