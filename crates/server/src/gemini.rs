use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::{GeminiConfig, ReceiptAnalysis, SeoSuggestions};

/// Thin client over the `generateContent` endpoint, always asking for a
/// JSON answer shaped by a response schema.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

const RECEIPT_PROMPT: &str =
    "Analyze this bill receipt. Extract the Date, Amount, and Category. Return JSON.";

fn seo_prompt(keyword: &str) -> String {
    format!(
        "Provide 5 SEO strategy points for the keyword: \"{keyword}\". Return the result in JSON format."
    )
}

fn seo_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    }
                }
            }
        }
    })
}

fn receipt_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": { "type": "STRING" },
            "amount": { "type": "NUMBER" },
            "category": { "type": "STRING" },
            "summary": { "type": "STRING" }
        }
    })
}

/// Strip an optional `data:<mime>;base64,` prefix off an uploaded image.
pub fn strip_data_url(image: &str) -> &str {
    match image.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => image,
    }
}

/// Pull the first candidate's text and decode it as `T`.
fn parse_answer<T: DeserializeOwned>(raw: GenerateResponse) -> Result<T, String> {
    let text = raw
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
        .ok_or_else(|| "Model returned no text".to_string())?;
    serde_json::from_str(text.trim()).map_err(|e| format!("Model answer is not valid JSON: {e}"))
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        }
    }

    async fn generate<T: DeserializeOwned>(&self, parts: Value, schema: Value) -> Result<T, String> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Gemini request failed: {e}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(format!("Gemini API error ({status}): {text}"));
        }

        let raw: GenerateResponse = response
            .json()
            .await
            .map_err(|e| format!("Unreadable Gemini response: {e}"))?;
        parse_answer(raw)
    }

    /// Five SEO strategy points for a keyword. Empty on any failure.
    #[tracing::instrument(skip(self))]
    pub async fn generate_seo_suggestions(&self, keyword: &str) -> SeoSuggestions {
        let parts = json!([{ "text": seo_prompt(keyword) }]);
        match self.generate::<SeoSuggestions>(parts, seo_schema()).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "SEO suggestion request failed");
                SeoSuggestions::default()
            }
        }
    }

    /// Read date, amount and category off a receipt photo.
    #[tracing::instrument(skip(self, image_base64), fields(bytes = image_base64.len()))]
    pub async fn analyze_bill_receipt(&self, image_base64: &str) -> Option<ReceiptAnalysis> {
        let parts = json!([
            { "inlineData": { "mimeType": "image/jpeg", "data": strip_data_url(image_base64) } },
            { "text": RECEIPT_PROMPT }
        ]);
        match self.generate::<ReceiptAnalysis>(parts, receipt_schema()).await {
            Ok(a) => Some(a),
            Err(e) => {
                tracing::error!(error = %e, "Receipt analysis failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(text: &str) -> GenerateResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    #[test]
    fn parses_seo_answer() {
        let raw = envelope(r#"{"suggestions":[{"title":"Long tail","description":"Target phrases"}]}"#);
        let s: SeoSuggestions = parse_answer(raw).unwrap();
        assert_eq!(s.suggestions.len(), 1);
        assert_eq!(s.suggestions[0].title, "Long tail");
    }

    #[test]
    fn parses_receipt_answer() {
        let raw = envelope(r#"{"date":"2025-03-01","amount":249.5,"category":"Food","summary":"Lunch"}"#);
        let a: ReceiptAnalysis = parse_answer(raw).unwrap();
        assert_eq!(a.amount, Some(249.5));
        assert_eq!(a.category.as_deref(), Some("Food"));
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let raw: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parse_answer::<SeoSuggestions>(raw).is_err());
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        assert_eq!(strip_data_url("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url("QUJD"), "QUJD");
    }

    #[test]
    fn seo_prompt_quotes_keyword() {
        assert!(seo_prompt("coffee shop").contains("\"coffee shop\""));
    }
}
