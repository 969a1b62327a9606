use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, MockGemini};

#[tokio::test]
async fn analyze_endpoint_returns_extracted_fields() {
    let mock = MockGemini::answering(json!({
        "date": "2025-03-03",
        "amount": 312.75,
        "category": "Travel",
        "summary": "Auto rickshaw"
    }));
    let app = common::app(common::state_with(None, Some(mock.start().await)));
    let token = common::login(&app, "sarah@workforce.com").await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/bills/analyze",
        Some(json!({ "imageBase64": "data:image/jpeg;base64,/9j/BBBB" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], 312.75);
    assert_eq!(body["summary"], "Auto rickshaw");
}

#[tokio::test]
async fn unreadable_receipt_is_bad_gateway() {
    let mock = MockGemini::failing(StatusCode::INTERNAL_SERVER_ERROR);
    let app = common::app(common::state_with(None, Some(mock.start().await)));
    let token = common::login(&app, "sarah@workforce.com").await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/bills/analyze",
        Some(json!({ "imageBase64": "AAAA" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["message"],
        "Could not read the receipt. Please fill in the details manually."
    );
}

#[tokio::test]
async fn seo_endpoint_proxies_suggestions() {
    let mock = MockGemini::answering(json!({
        "suggestions": [{ "title": "Schema markup", "description": "Add LocalBusiness." }]
    }));
    let app = common::app(common::state_with(None, Some(mock.start().await)));
    let token = common::login(&app, "marcus@workforce.com").await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/campaigns/seo",
        Some(json!({ "keyword": "  wedding photography  " })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["title"], "Schema markup");

    let (_, _, sent) = &mock.requests()[0];
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"wedding photography\""));
}
