use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of workforce errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    Unauthorized,
    Forbidden,
    RateLimited,
    /// An external collaborator (sheet, AI) failed in a way the caller must see.
    Upstream,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppErrorKind::NotFound => "NotFound",
            AppErrorKind::BadRequest => "BadRequest",
            AppErrorKind::ValidationError => "ValidationError",
            AppErrorKind::Conflict => "Conflict",
            AppErrorKind::Unauthorized => "Unauthorized",
            AppErrorKind::Forbidden => "Forbidden",
            AppErrorKind::RateLimited => "RateLimited",
            AppErrorKind::Upstream => "Upstream",
            AppErrorKind::InternalError => "InternalError",
        };
        f.write_str(label)
    }
}

/// Structured error shared by the store, the REST layer and the client.
///
/// `message` is always safe to show to the person using the app; the login
/// and OTP forms render it inline verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn of(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::BadRequest, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::RateLimited, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Conflict, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Forbidden, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Upstream, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::InternalError, message)
    }

    /// Shorthand for the guard every owner-only operation shares.
    pub fn owner_only() -> Self {
        Self::forbidden("Only the workspace owner can perform this action.")
    }

    /// True when the client should drop its session and return to login.
    pub fn is_session_failure(&self) -> bool {
        self.kind == AppErrorKind::Unauthorized
    }

    /// Parse an AppError from a ServerFnError message string (client-side).
    ///
    /// `ServerFnError::to_string()` wraps the payload like:
    ///   `error running server function: {"kind":"Unauthorized",...} (details: None)`
    pub fn from_server_error(error_message: &str) -> Option<Self> {
        if let Ok(err) = serde_json::from_str::<Self>(error_message) {
            return Some(err);
        }
        let start = error_message.find('{')?;
        let end = error_message.rfind('}')?;
        if end > start {
            serde_json::from_str(&error_message[start..=end]).ok()
        } else {
            None
        }
    }

    /// Per-field validation errors embedded in a `ServerFnError` string.
    pub fn parse_field_errors(error_string: &str) -> HashMap<String, String> {
        Self::from_server_error(error_string)
            .map(|e| e.field_errors)
            .unwrap_or_default()
    }

    /// The user-facing message embedded in a `ServerFnError` string, or a
    /// generic fallback.
    pub fn friendly_message(error_string: &str) -> String {
        match Self::from_server_error(error_string) {
            Some(app_error) => app_error.message,
            None => "Something went wrong. Please try again.".to_string(),
        }
    }

    #[cfg_attr(not(feature = "server"), allow(dead_code))]
    fn status_code_u16(&self) -> u16 {
        match self.kind {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::Conflict => 409,
            AppErrorKind::Unauthorized => 401,
            AppErrorKind::Forbidden => 403,
            AppErrorKind::RateLimited => 429,
            AppErrorKind::Upstream => 502,
            AppErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Please correct the highlighted fields.", field_errors)
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_server_error_parses_wrapped_json() {
        let wrapped = r#"error running server function: {"kind":"BadRequest","message":"Invalid OTP code"} (details: None)"#;
        let err = AppError::from_server_error(wrapped).unwrap();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message, "Invalid OTP code");
    }

    #[test]
    fn from_server_error_returns_none_for_garbage() {
        assert!(AppError::from_server_error("not json at all").is_none());
        assert!(AppError::from_server_error("} {").is_none());
    }

    #[test]
    fn friendly_message_prefers_embedded_message() {
        let json = r#"{"kind":"Forbidden","message":"Account access denied by administrator."}"#;
        assert_eq!(
            AppError::friendly_message(json),
            "Account access denied by administrator."
        );
        assert_eq!(
            AppError::friendly_message("connection reset"),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn parse_field_errors_reads_validation_payload() {
        let mut fields = HashMap::new();
        fields.insert("email".to_string(), "A valid email is required".to_string());
        let raw = serde_json::to_string(&AppError::validation("bad", fields)).unwrap();
        let parsed = AppError::parse_field_errors(&format!("error: {raw}"));
        assert_eq!(parsed["email"], "A valid email is required");
    }

    #[test]
    fn status_code_mapping() {
        assert_eq!(AppError::not_found("").status_code_u16(), 404);
        assert_eq!(AppError::conflict("").status_code_u16(), 409);
        assert_eq!(AppError::owner_only().status_code_u16(), 403);
        assert_eq!(AppError::unauthorized("").status_code_u16(), 401);
        assert_eq!(AppError::upstream("").status_code_u16(), 502);
        assert_eq!(AppError::rate_limited("").status_code_u16(), 429);
    }

    #[test]
    fn only_unauthorized_is_a_session_failure() {
        assert!(AppError::unauthorized("expired").is_session_failure());
        assert!(!AppError::forbidden("no").is_session_failure());
    }

    #[test]
    fn display_includes_kind() {
        let err = AppError::bad_request("No active request");
        assert_eq!(err.to_string(), "BadRequest: No active request");
    }
}
