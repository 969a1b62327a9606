use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::MockGemini;

#[tokio::test]
async fn seo_request_carries_schema_and_key() {
    let mock = MockGemini::answering(json!({
        "suggestions": [
            { "title": "Long-tail phrases", "description": "Target 'best dosa in Chennai'." },
            { "title": "Local listings", "description": "Claim the business profile." }
        ]
    }));
    let client = mock.start().await;

    let result = client.generate_seo_suggestions("south indian catering").await;
    assert_eq!(result.suggestions.len(), 2);
    assert_eq!(result.suggestions[1].title, "Local listings");

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let (call, key, body) = &requests[0];
    assert_eq!(call, "test-model:generateContent");
    assert_eq!(key, "test-key");
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(
        body["generationConfig"]["responseSchema"]["properties"]["suggestions"]["type"],
        "ARRAY"
    );
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"south indian catering\""));
}

#[tokio::test]
async fn seo_failure_yields_no_suggestions() {
    let mock = MockGemini::failing(StatusCode::TOO_MANY_REQUESTS);
    let client = mock.start().await;
    assert!(client.generate_seo_suggestions("x").await.suggestions.is_empty());
}

#[tokio::test]
async fn receipt_is_sent_without_data_url_prefix() {
    let mock = MockGemini::answering(json!({
        "date": "2025-02-28",
        "amount": "1,020",
        "category": "food",
        "summary": "Team dinner"
    }));
    let client = mock.start().await;

    let analysis = client
        .analyze_bill_receipt("data:image/jpeg;base64,/9j/AAAA")
        .await
        .unwrap();
    assert_eq!(analysis.amount, Some(1020.0));
    assert_eq!(analysis.category.as_deref(), Some("food"));

    let (_, _, body) = &mock.requests()[0];
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], "/9j/AAAA");
    assert!(parts[1]["text"].as_str().unwrap().contains("bill receipt"));
}

#[tokio::test]
async fn prose_answer_is_not_an_analysis() {
    let mock = MockGemini::answering_text("Sorry, I cannot read this image.");
    let client = mock.start().await;
    assert!(client.analyze_bill_receipt("AAAA").await.is_none());
}
