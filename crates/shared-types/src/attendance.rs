use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Number of records an owner sees in the shared history panels.
pub const OWNER_HISTORY_LIMIT: usize = 10;

/// A geolocation fix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LocationRecord {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
}

impl LocationRecord {
    pub fn new(lat: f64, lng: f64, timestamp: DateTime<Utc>) -> Self {
        Self { lat, lng, timestamp }
    }

    /// `lat, lng` as sent to the sheet audit log.
    pub fn as_pair(&self) -> String {
        format!("{}, {}", self.lat, self.lng)
    }

    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat, self.lng)
    }
}

/// One shift: opened at check-in, closed at check-out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub check_in: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_loc: Option<LocationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_loc: Option<LocationRecord>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// Hours between check-in and check-out; `None` while the shift is open.
    pub fn duration_hours(&self) -> Option<f64> {
        self.check_out
            .map(|out| (out - self.check_in).num_milliseconds() as f64 / 3_600_000.0)
    }

    /// Two-decimal hours, or `Active` for an open shift.
    pub fn format_duration(&self) -> String {
        match self.duration_hours() {
            Some(hours) => format!("{hours:.2}"),
            None => "Active".to_string(),
        }
    }
}

/// Records the viewer may see in history panels, newest first.
///
/// Owners get the latest [`OWNER_HISTORY_LIMIT`] records of everyone;
/// everyone else gets all of their own.
pub fn attendance_history(records: &[AttendanceRecord], viewer: &User) -> Vec<AttendanceRecord> {
    if viewer.role.is_owner() {
        records
            .iter()
            .rev()
            .take(OWNER_HISTORY_LIMIT)
            .cloned()
            .collect()
    } else {
        records
            .iter()
            .rev()
            .filter(|r| r.employee_id == viewer.id)
            .cloned()
            .collect()
    }
}

/// The latest `n` records for one employee, newest first.
pub fn recent_for(records: &[AttendanceRecord], user_id: &str, n: usize) -> Vec<AttendanceRecord> {
    records
        .iter()
        .rev()
        .filter(|r| r.employee_id == user_id)
        .take(n)
        .cloned()
        .collect()
}

/// Case-insensitive match against employee name or id, newest first.
pub fn search_attendance(records: &[AttendanceRecord], term: &str) -> Vec<AttendanceRecord> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .rev()
        .filter(|r| {
            needle.is_empty()
                || r.employee_name.to_lowercase().contains(&needle)
                || r.employee_id.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn open_shifts(records: &[AttendanceRecord]) -> impl Iterator<Item = &AttendanceRecord> {
    records.iter().filter(|r| r.is_open())
}

pub fn is_checked_in(records: &[AttendanceRecord], user_id: &str) -> bool {
    open_shifts(records).any(|r| r.employee_id == user_id)
}
