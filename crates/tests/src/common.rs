use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use server::gemini::GeminiClient;
use server::rate_limit::RateLimitState;
use server::sheet::SheetClient;
use server::state::AppState;
use server::store::Workforce;
use shared_types::{GeminiConfig, ShiftConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Bind a router on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Mock server has no address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

/// Wait until `check` holds, polling every 20ms for up to two seconds.
pub async fn eventually<F: FnMut() -> bool>(mut check: F) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}

// ---------------------------------------------------------------------------
// Mock spreadsheet macro
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SheetData {
    /// Bill rows served on GET.
    pub rows: Vec<Value>,
    /// Every POST body received, decoded.
    pub posts: Vec<Value>,
    /// Content-Type of every POST received.
    pub content_types: Vec<String>,
    /// When set, every request fails with this status.
    pub fail_with: Option<StatusCode>,
}

#[derive(Clone, Default)]
pub struct MockSheet {
    pub data: Arc<Mutex<SheetData>>,
}

impl MockSheet {
    pub fn with_rows(rows: Vec<Value>) -> Self {
        let sheet = Self::default();
        sheet.data.lock().unwrap().rows = rows;
        sheet
    }

    pub fn posts(&self) -> Vec<Value> {
        self.data.lock().unwrap().posts.clone()
    }

    pub fn rows(&self) -> Vec<Value> {
        self.data.lock().unwrap().rows.clone()
    }

    pub fn fail_with(&self, status: StatusCode) {
        self.data.lock().unwrap().fail_with = Some(status);
    }

    /// Start the mock and return a client pointed at it.
    pub async fn start(&self) -> SheetClient {
        let router = Router::new()
            .route("/macro", get(sheet_read).post(sheet_write))
            .with_state(self.clone());
        SheetClient::new(format!("{}/macro", serve(router).await))
    }
}

async fn sheet_read(State(sheet): State<MockSheet>) -> Response {
    let data = sheet.data.lock().unwrap();
    if let Some(status) = data.fail_with {
        return status.into_response();
    }
    Json(Value::Array(data.rows.clone())).into_response()
}

/// Applies `createBill` and `updateBillStatus` to the rows, the way the
/// macro does.
async fn sheet_write(
    State(sheet): State<MockSheet>,
    headers: axum::http::HeaderMap,
    body: String,
) -> Response {
    let mut data = sheet.data.lock().unwrap();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    data.content_types.push(content_type);
    let Ok(payload) = serde_json::from_str::<Value>(&body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    data.posts.push(payload.clone());
    if let Some(status) = data.fail_with {
        return status.into_response();
    }

    match payload["action"].as_str() {
        Some("createBill") => {
            let mut row = payload.clone();
            if let Some(obj) = row.as_object_mut() {
                obj.remove("action");
            }
            data.rows.insert(0, row);
        }
        Some("updateBillStatus") => {
            for row in data.rows.iter_mut().filter(|r| r["id"] == payload["id"]) {
                row["status"] = payload["status"].clone();
            }
        }
        _ => {}
    }
    StatusCode::OK.into_response()
}

/// A bill row as the sheet hands it back: numeric ids, string amounts and
/// full timestamps.
pub fn sheet_row(id: u64, employee_id: u64, amount: &str, status: &str) -> Value {
    let name = if employee_id == 2 { "Sarah Chen" } else { "Marcus Miller" };
    json!({
        "id": id,
        "employeeId": employee_id,
        "employeeName": name,
        "date": "2025-02-14T00:00:00.000Z",
        "amount": amount,
        "category": "Travel",
        "description": "Airport cab",
        "imageUrl": "",
        "status": status
    })
}

// ---------------------------------------------------------------------------
// Mock Gemini endpoint
// ---------------------------------------------------------------------------

pub struct GeminiData {
    /// Text the model "answers" with.
    pub answer: String,
    pub status: StatusCode,
    pub requests: Vec<(String, String, Value)>,
}

#[derive(Clone)]
pub struct MockGemini {
    pub data: Arc<Mutex<GeminiData>>,
}

impl MockGemini {
    pub fn answering(answer: Value) -> Self {
        Self::answering_text(answer.to_string())
    }

    pub fn answering_text(answer: impl Into<String>) -> Self {
        Self {
            data: Arc::new(Mutex::new(GeminiData {
                answer: answer.into(),
                status: StatusCode::OK,
                requests: Vec::new(),
            })),
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        let mock = Self::answering_text("");
        mock.data.lock().unwrap().status = status;
        mock
    }

    /// (path, api key, body) of every call.
    pub fn requests(&self) -> Vec<(String, String, Value)> {
        self.data.lock().unwrap().requests.clone()
    }

    pub async fn start(&self) -> GeminiClient {
        let router = Router::new()
            .route("/v1beta/models/{*call}", post(gemini_generate))
            .with_state(self.clone());
        let config = GeminiConfig {
            model: "test-model".to_string(),
            base_url: serve(router).await,
        };
        GeminiClient::new(&config, "test-key")
    }
}

async fn gemini_generate(
    State(mock): State<MockGemini>,
    axum::extract::Path(call): axum::extract::Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = mock.data.lock().unwrap();
    data.requests
        .push((call, query.get("key").cloned().unwrap_or_default(), body));
    if !data.status.is_success() {
        return (data.status, "quota exceeded").into_response();
    }
    Json(json!({
        "candidates": [{ "content": { "parts": [{ "text": data.answer }] } }]
    }))
    .into_response()
}

// ---------------------------------------------------------------------------
// App wiring
// ---------------------------------------------------------------------------

pub fn state_with(sheet: Option<SheetClient>, gemini: Option<GeminiClient>) -> AppState {
    AppState::new(
        Workforce::seeded(&ShiftConfig::default()).shared(),
        sheet,
        gemini,
    )
}

/// The REST API with the session middleware, as the app mounts it.
pub fn app(state: AppState) -> Router {
    server::openapi::api_router(
        state.clone(),
        RateLimitState::new(1000, Duration::from_secs(60)),
    )
    .layer(middleware::from_fn_with_state(
        state.workforce.clone(),
        server::auth::middleware::session_middleware,
    ))
}

/// Send a JSON request with an optional Bearer token.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
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
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn login(app: &Router, email: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": email })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}
