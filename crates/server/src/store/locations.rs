use chrono::{DateTime, Utc};
use shared_types::{AppError, LiveLocation, LocationRecord, User};

use super::Workforce;

impl Workforce {
    /// Record the actor's latest position, as reported by the browser
    /// geolocation watch.
    pub fn update_employee_location(
        &mut self,
        actor_id: &str,
        lat: f64,
        lng: f64,
        now: DateTime<Utc>,
    ) -> Result<LocationRecord, AppError> {
        self.actor(actor_id)?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::bad_request("Coordinates out of range"));
        }
        let record = LocationRecord::new(lat, lng, now);
        self.locations.insert(actor_id.to_string(), record);
        Ok(record)
    }

    pub fn toggle_location_sharing(&mut self, actor_id: &str) -> Result<bool, AppError> {
        let next = !self.is_sharing(actor_id);
        self.set_location_sharing(actor_id, next)
    }

    pub fn set_location_sharing(&mut self, actor_id: &str, enabled: bool) -> Result<bool, AppError> {
        self.actor(actor_id)?;
        if enabled {
            self.sharing.insert(actor_id.to_string());
        } else {
            self.sharing.remove(actor_id);
        }
        Ok(enabled)
    }

    pub fn is_sharing(&self, user_id: &str) -> bool {
        self.sharing.contains(user_id)
    }

    pub fn latest_location(&self, user_id: &str) -> Option<LocationRecord> {
        self.locations.get(user_id).copied()
    }

    /// Positions the viewer may see: everyone's for an owner, their own
    /// otherwise. Newest fix first.
    pub fn live_locations(&self, viewer: &User) -> Vec<LiveLocation> {
        let mut out: Vec<LiveLocation> = self
            .locations
            .iter()
            .filter(|(user_id, _)| viewer.role.is_owner() || **user_id == viewer.id)
            .map(|(user_id, location)| LiveLocation {
                user_id: user_id.clone(),
                name: self
                    .users
                    .iter()
                    .find(|u| &u.id == user_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default(),
                location: *location,
                sharing: self.sharing.contains(user_id),
            })
            .collect();
        out.sort_by(|a, b| b.location.timestamp.cmp(&a.location.timestamp));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use chrono::Duration;
    use shared_types::AppErrorKind;

    #[test]
    fn toggle_flips_sharing() {
        let mut wf = workforce();
        assert!(wf.toggle_location_sharing(SARAH).unwrap());
        assert!(wf.is_sharing(SARAH));
        assert!(!wf.toggle_location_sharing(SARAH).unwrap());
        assert!(!wf.is_sharing(SARAH));
    }

    #[test]
    fn owner_sees_all_positions_employee_sees_own() {
        let mut wf = workforce();
        wf.update_employee_location(SARAH, 13.0, 80.0, t0()).unwrap();
        wf.update_employee_location(MARCUS, 12.0, 77.0, t0() + Duration::seconds(5)).unwrap();

        let owner = wf.user(OWNER).unwrap().clone();
        let all = wf.live_locations(&owner);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Marcus Miller");

        let sarah = wf.user(SARAH).unwrap().clone();
        let own = wf.live_locations(&sarah);
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].user_id, SARAH);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut wf = workforce();
        let err = wf.update_employee_location(SARAH, 91.0, 0.0, t0()).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
    }
}
