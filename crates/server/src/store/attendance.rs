use chrono::{DateTime, Utc};
use shared_types::{is_checked_in, AppError, AttendanceRecord, Coordinates, LocationRecord};

use super::{new_id, Workforce};

fn fix(location: Option<Coordinates>, now: DateTime<Utc>) -> Option<LocationRecord> {
    location.map(|c| LocationRecord::new(c.lat, c.lng, now))
}

// Only reachable through `confirm_shift_action`: a shift opens or closes
// on an owner-issued code, never on the employee's say-so.
impl Workforce {
    /// Open a shift record for the actor. A known position also becomes
    /// their latest live location.
    pub(crate) fn check_in(
        &mut self,
        actor_id: &str,
        location: Option<Coordinates>,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, AppError> {
        let actor = self.actor(actor_id)?;
        if is_checked_in(&self.attendance, actor_id) {
            return Err(AppError::conflict("Already on shift"));
        }
        let record = AttendanceRecord {
            id: new_id(),
            employee_id: actor.id.clone(),
            employee_name: actor.name.clone(),
            check_in: now,
            check_out: None,
            check_in_loc: fix(location, now),
            check_out_loc: None,
        };
        if let Some(loc) = record.check_in_loc {
            self.locations.insert(actor_id.to_string(), loc);
        }
        self.attendance.push(record.clone());
        Ok(record)
    }

    /// Close every open record of the actor. Returns how many were closed.
    pub(crate) fn check_out(
        &mut self,
        actor_id: &str,
        location: Option<Coordinates>,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        self.actor(actor_id)?;
        let loc = fix(location, now);
        let mut closed = 0;
        for record in self
            .attendance
            .iter_mut()
            .filter(|r| r.employee_id == actor_id && r.is_open())
        {
            record.check_out = Some(now);
            record.check_out_loc = loc;
            closed += 1;
        }
        if let Some(loc) = loc {
            self.locations.insert(actor_id.to_string(), loc);
        }
        Ok(closed)
    }
}
