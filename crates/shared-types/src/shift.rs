use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which transition an employee is asking the owner to authorize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftRequestType {
    Start,
    Stop,
}

impl ShiftRequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftRequestType::Start => "START",
            ShiftRequestType::Stop => "STOP",
        }
    }
}

/// A pending shift transition awaiting OTP confirmation.
///
/// The owner generates `otp`; the employee types it back in before
/// `otp_expires_at`. Expired codes are replaced by the server ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequest {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    #[serde(rename = "type")]
    pub kind: ShiftRequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ShiftRequest {
    /// True once the owner has issued a code, even if the code itself has
    /// been redacted from this copy.
    pub fn is_authorized(&self) -> bool {
        self.otp_expires_at.is_some()
    }

    pub fn is_otp_expired(&self, now: DateTime<Utc>) -> bool {
        self.otp_expires_at.is_some_and(|exp| now > exp)
    }

    /// Whole seconds until expiry, clamped at zero.
    pub fn seconds_left(&self, now: DateTime<Utc>) -> i64 {
        self.otp_expires_at
            .map(|exp| (exp - now).num_seconds().max(0))
            .unwrap_or(0)
    }

    /// Copy without the code, for the requesting employee's own view.
    pub fn redacted(&self) -> Self {
        Self {
            otp: None,
            ..self.clone()
        }
    }
}

/// `m:ss` countdown label.
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// A code is exactly six ASCII digits.
pub fn is_valid_otp_format(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Strip everything but digits and cap at six, as the OTP input does.
pub fn sanitize_otp_input(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(6).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn request() -> ShiftRequest {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        ShiftRequest {
            id: "r1".into(),
            employee_id: "2".into(),
            employee_name: "Sarah Chen".into(),
            kind: ShiftRequestType::Start,
            otp: Some("482913".into()),
            otp_expires_at: Some(created + Duration::seconds(120)),
            created_at: created,
        }
    }

    #[test]
    fn wire_uses_type_key() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["type"], "START");
        assert_eq!(json["employeeId"], "2");
    }

    #[test]
    fn expiry_and_countdown() {
        let req = request();
        let created = req.created_at;
        assert!(!req.is_otp_expired(created + Duration::seconds(120)));
        assert!(req.is_otp_expired(created + Duration::seconds(121)));
        assert_eq!(req.seconds_left(created + Duration::seconds(45)), 75);
        assert_eq!(req.seconds_left(created + Duration::seconds(500)), 0);
    }

    #[test]
    fn redaction_keeps_authorization_marker() {
        let hidden = request().redacted();
        assert!(hidden.otp.is_none());
        assert!(hidden.is_authorized());
        assert!(!serde_json::to_string(&hidden).unwrap().contains("482913"));
    }

    #[test]
    fn countdown_label() {
        assert_eq!(format_countdown(120), "2:00");
        assert_eq!(format_countdown(9), "0:09");
        assert_eq!(format_countdown(-3), "0:00");
    }

    #[test]
    fn otp_input_rules() {
        assert_eq!(sanitize_otp_input("12a3-45 678"), "123456");
        assert!(is_valid_otp_format("004512"));
        assert!(!is_valid_otp_format("12345"));
        assert!(!is_valid_otp_format("12345x"));
    }
}
