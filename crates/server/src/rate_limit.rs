use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use shared_types::RateLimitConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Sliding window rate limit state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    inner: Arc<Mutex<RateLimitInner>>,
}

struct RateLimitInner {
    /// Map from client key -> request timestamps inside the window.
    requests: HashMap<String, Vec<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimitState {
    /// Create rate limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimitInner {
                requests: HashMap::new(),
                max_requests,
                window,
            })),
        }
    }

    /// The login limiter described by `[rate_limit]` in config.toml.
    pub fn for_login(config: &RateLimitConfig) -> Self {
        Self::new(
            config.login_max_attempts,
            Duration::from_secs(config.login_window_secs),
        )
    }

    /// Record a request from `key` if the window has room. Returns true if allowed.
    fn check_at(&self, key: &str, now: Instant) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return true;
        };
        let window = inner.window;
        let max = inner.max_requests;

        inner.requests.retain(|_, timestamps| {
            timestamps.retain(|t| now.duration_since(*t) < window);
            !timestamps.is_empty()
        });

        let timestamps = inner.requests.entry(key.to_string()).or_default();

        if timestamps.len() >= max {
            return false;
        }

        timestamps.push(now);
        true
    }

    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.inner.lock().map(|inner| inner.requests.len()).unwrap_or(0)
    }
}

/// Client key: first hop of `X-Forwarded-For`, then `X-Real-IP`.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum middleware that enforces the sliding window per client address.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(request.headers());

    if !state.check(&key) {
        tracing::warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "kind": "RateLimited",
                "message": "Too many sign-in attempts. Please try again later."
            })),
        )
            .into_response();
    }

    next.run(request).await
}
