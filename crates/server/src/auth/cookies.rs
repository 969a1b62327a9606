use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

pub const SESSION_COOKIE: &str = "workforce_session";

/// Sessions live in memory, so the cookie never needs to outlast a working week.
const SESSION_MAX_AGE_DAYS: i64 = 7;

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

fn session_cookie(value: &str, max_age: cookie::time::Duration) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    HeaderValue::from_str(&cookie.build().to_string()).ok()
}

/// Build a Set-Cookie header value carrying the session token.
pub fn build_session_cookie(token: &str) -> Option<HeaderValue> {
    session_cookie(
        token,
        cookie::time::Duration::seconds(SESSION_MAX_AGE_DAYS * 86400),
    )
}

/// Build a Set-Cookie header value that clears the session cookie.
pub fn build_clear_cookie() -> Option<HeaderValue> {
    session_cookie("", cookie::time::Duration::ZERO)
}

/// Extract the session token from the cookie (preferred) or Bearer header (fallback).
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, SESSION_COOKIE).filter(|t| !t.is_empty()) {
        return Some(token);
    }

    // REST API clients
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}

pub fn set_session_cookie(headers: &mut HeaderMap, token: &str) {
    if let Some(value) = build_session_cookie(token) {
        headers.append(header::SET_COOKIE, value);
    }
}

pub fn clear_session_cookie(headers: &mut HeaderMap) {
    if let Some(value) = build_clear_cookie() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Pending cookie action to be picked up by the session middleware.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set(String),
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn schedule(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.schedule(action);
        }
    }
}

/// Schedule the session cookie to be set by the middleware.
/// Called from server functions.
pub fn schedule_session_cookie(token: &str) {
    schedule(PendingCookieAction::Set(token.to_string()));
}

/// Schedule the session cookie to be cleared by the middleware.
pub fn schedule_clear_cookie() {
    schedule(PendingCookieAction::Clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; workforce_session=abc"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn bearer_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("xyz"));
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn session_cookie_is_http_only() {
        let value = build_session_cookie("tok").unwrap();
        let text = value.to_str().unwrap();
        assert!(text.starts_with("workforce_session=tok"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("SameSite=Lax"));
    }

    #[test]
    fn slot_hands_over_once() {
        let slot = CookieSlot::default();
        slot.schedule(PendingCookieAction::Clear);
        assert_eq!(slot.take(), Some(PendingCookieAction::Clear));
        assert_eq!(slot.take(), None);
    }
}
