use chrono::{DateTime, Utc};
use shared_types::{scope_bills, AppError, ShiftRequest, WorkspaceSnapshot};

use super::Workforce;

impl Workforce {
    /// The role-filtered read model for one viewer.
    ///
    /// Employees only ever see their own records, and their own shift
    /// request comes back without the code so it has to be read out by
    /// the owner.
    pub fn snapshot(&self, viewer_id: &str, now: DateTime<Utc>) -> Result<WorkspaceSnapshot, AppError> {
        let me = self.actor(viewer_id)?.clone();
        let is_owner = me.role.is_owner();

        let users = if is_owner {
            self.users.clone()
        } else {
            vec![me.clone()]
        };
        let attendance = self
            .attendance
            .iter()
            .filter(|r| is_owner || r.employee_id == me.id)
            .cloned()
            .collect();
        let shift_requests: Vec<ShiftRequest> = if is_owner {
            self.shift_requests.clone()
        } else {
            self.shift_requests
                .iter()
                .filter(|r| r.employee_id == me.id)
                .map(ShiftRequest::redacted)
                .collect()
        };

        Ok(WorkspaceSnapshot {
            users,
            bills: scope_bills(&self.bills, &me),
            attendance,
            campaigns: self.campaigns.clone(),
            shift_requests,
            locations: self.live_locations(&me),
            sharing_location: self.is_sharing(&me.id),
            server_time: now,
            me,
        })
    }
}
