use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attendance::{open_shifts, AttendanceRecord, LocationRecord};
use crate::bill::{Bill, BillStatus};
use crate::campaign::Campaign;
use crate::models::User;
use crate::shift::ShiftRequest;

/// The latest reported position of one person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LiveLocation {
    pub user_id: String,
    pub name: String,
    pub location: LocationRecord,
    pub sharing: bool,
}

/// Everything one signed-in user is allowed to see, in one read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub me: User,
    pub users: Vec<User>,
    pub bills: Vec<Bill>,
    pub attendance: Vec<AttendanceRecord>,
    pub campaigns: Vec<Campaign>,
    pub shift_requests: Vec<ShiftRequest>,
    pub locations: Vec<LiveLocation>,
    pub sharing_location: bool,
    pub server_time: DateTime<Utc>,
}

impl WorkspaceSnapshot {
    /// The viewer's own outstanding shift request, if any.
    pub fn my_request(&self) -> Option<&ShiftRequest> {
        self.shift_requests
            .iter()
            .find(|r| r.employee_id == self.me.id)
    }

    pub fn is_checked_in(&self) -> bool {
        crate::attendance::is_checked_in(&self.attendance, &self.me.id)
    }

    pub fn my_location(&self) -> Option<&LocationRecord> {
        self.locations
            .iter()
            .find(|l| l.user_id == self.me.id)
            .map(|l| &l.location)
    }

    pub fn owner_stats(&self) -> OwnerStats {
        OwnerStats::compute(&self.attendance, &self.shift_requests, &self.bills)
    }
}

/// Counters on the owner's home dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OwnerStats {
    pub active_shifts: usize,
    pub pending_otp_requests: usize,
    pub pending_bills: usize,
}

impl OwnerStats {
    pub fn compute(attendance: &[AttendanceRecord], requests: &[ShiftRequest], bills: &[Bill]) -> Self {
        Self {
            active_shifts: open_shifts(attendance).count(),
            pending_otp_requests: requests.len(),
            pending_bills: bills
                .iter()
                .filter(|b| b.status == BillStatus::Pending)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::ShiftRequestType;
    use chrono::TimeZone;

    #[test]
    fn stats_count_open_shifts_requests_and_pending_bills() {
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let open = AttendanceRecord {
            id: "a".into(),
            employee_id: "2".into(),
            employee_name: "Sarah".into(),
            check_in: t,
            check_out: None,
            check_in_loc: None,
            check_out_loc: None,
        };
        let closed = AttendanceRecord {
            id: "b".into(),
            check_out: Some(t),
            ..open.clone()
        };
        let request = ShiftRequest {
            id: "r".into(),
            employee_id: "3".into(),
            employee_name: "Marcus".into(),
            kind: ShiftRequestType::Start,
            otp: None,
            otp_expires_at: None,
            created_at: t,
        };
        let pending: Bill = serde_json::from_str(r#"{"id":"1","status":"PENDING"}"#).unwrap();
        let approved: Bill = serde_json::from_str(r#"{"id":"2","status":"APPROVED"}"#).unwrap();

        let stats = OwnerStats::compute(&[open, closed], &[request], &[pending, approved]);
        assert_eq!(
            stats,
            OwnerStats {
                active_shifts: 1,
                pending_otp_requests: 1,
                pending_bills: 1
            }
        );
    }
}
