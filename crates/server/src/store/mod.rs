//! In-memory workforce state.
//!
//! `Workforce` is the single source of truth for users, sessions, bills,
//! attendance, shift requests, campaigns and live locations. Nothing is
//! persisted; a restart reseeds the three demo accounts. Every operation
//! takes the acting user's id and, where time matters, an explicit `now`
//! so the OTP flow is testable without sleeping.

mod attendance;
mod bills;
mod campaigns;
mod locations;
mod shifts;
mod snapshot;
mod users;

use chrono::Duration;
use shared_types::{
    avatar_for, AppError, AttendanceRecord, Bill, Campaign, LocationRecord, ShiftConfig,
    ShiftRequest, User, UserRole, UserStatus,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

pub use users::hash_token;

/// Handle shared by REST handlers, server functions and background tasks.
pub type SharedWorkforce = Arc<RwLock<Workforce>>;

pub struct Workforce {
    users: Vec<User>,
    bills: Vec<Bill>,
    attendance: Vec<AttendanceRecord>,
    campaigns: Vec<Campaign>,
    shift_requests: Vec<ShiftRequest>,
    locations: HashMap<String, LocationRecord>,
    sharing: HashSet<String>,
    /// SHA-256 hex of the session token -> user id.
    sessions: HashMap<String, String>,
    otp_ttl: Duration,
}

impl Workforce {
    /// An empty workspace with only the given people in it.
    pub fn with_users(users: Vec<User>, shifts: &ShiftConfig) -> Self {
        Self {
            users,
            bills: Vec::new(),
            attendance: Vec::new(),
            campaigns: Vec::new(),
            shift_requests: Vec::new(),
            locations: HashMap::new(),
            sharing: HashSet::new(),
            sessions: HashMap::new(),
            otp_ttl: otp_ttl(shifts),
        }
    }

    /// The demo workspace: one owner, two employees.
    pub fn seeded(shifts: &ShiftConfig) -> Self {
        Self::with_users(seed_users(), shifts)
    }

    pub fn shared(self) -> SharedWorkforce {
        Arc::new(RwLock::new(self))
    }

    pub fn otp_ttl(&self) -> Duration {
        self.otp_ttl
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn shift_requests(&self) -> &[ShiftRequest] {
        &self.shift_requests
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn user(&self, id: &str) -> Result<&User, AppError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    fn user_mut(&mut self, id: &str) -> Result<&mut User, AppError> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// The acting user, who must still be active.
    pub fn actor(&self, actor_id: &str) -> Result<&User, AppError> {
        let user = self
            .user(actor_id)
            .map_err(|_| AppError::unauthorized("Authentication required"))?;
        if user.status == UserStatus::Disabled {
            return Err(AppError::forbidden("Account access denied by administrator."));
        }
        Ok(user)
    }

    /// The acting user, who must be an active owner.
    pub fn owner(&self, actor_id: &str) -> Result<&User, AppError> {
        let user = self.actor(actor_id)?;
        if !user.role.is_owner() {
            return Err(AppError::owner_only());
        }
        Ok(user)
    }
}

/// Out-of-range lifetimes fall back to the default; negative ones clamp to zero.
fn otp_ttl(shifts: &ShiftConfig) -> Duration {
    Duration::try_seconds(shifts.otp_ttl_secs)
        .or_else(|| Duration::try_seconds(ShiftConfig::default().otp_ttl_secs))
        .map_or_else(Duration::zero, |ttl| ttl.max(Duration::zero()))
}

fn seed_user(id: &str, name: &str, email: &str, role: UserRole, designation: &str, seed: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status: UserStatus::Active,
        avatar: avatar_for(seed),
        designation: designation.to_string(),
        mobile: None,
        password_hash: None,
    }
}

pub fn seed_users() -> Vec<User> {
    vec![
        seed_user("1", "Alex Thompson", "owner@workforce.com", UserRole::Owner, "General Manager", "owner"),
        seed_user("2", "Sarah Chen", "sarah@workforce.com", UserRole::Employee, "SEO Specialist", "sarah"),
        seed_user("3", "Marcus Miller", "marcus@workforce.com", UserRole::Employee, "Digital Marketer", "marcus"),
    ]
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    pub const OWNER: &str = "1";
    pub const SARAH: &str = "2";
    pub const MARCUS: &str = "3";

    pub fn workforce() -> Workforce {
        Workforce::seeded(&ShiftConfig::default())
    }

    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::Workforce;
    use chrono::Duration;
    use shared_types::{AppErrorKind, ShiftConfig};

    #[test]
    fn seed_has_one_owner() {
        let wf = workforce();
        assert_eq!(wf.users().len(), 3);
        assert!(wf.owner(OWNER).is_ok());
        assert_eq!(wf.owner(SARAH).unwrap_err().kind, AppErrorKind::Forbidden);
    }

    #[test]
    fn seed_avatars_come_from_picsum() {
        let wf = workforce();
        assert_eq!(wf.user(OWNER).unwrap().avatar, "https://picsum.photos/seed/owner/200");
        assert_eq!(wf.user(SARAH).unwrap().avatar, "https://picsum.photos/seed/sarah/200");
        assert_eq!(wf.user(MARCUS).unwrap().avatar, "https://picsum.photos/seed/marcus/200");
    }

    #[test]
    fn otp_lifetime_survives_out_of_range_config() {
        let huge = ShiftConfig { otp_ttl_secs: i64::MAX, regen_tick_secs: 1 };
        assert_eq!(Workforce::seeded(&huge).otp_ttl(), Duration::seconds(120));
        let negative = ShiftConfig { otp_ttl_secs: -5, regen_tick_secs: 1 };
        assert_eq!(Workforce::seeded(&negative).otp_ttl(), Duration::zero());
        let short = ShiftConfig { otp_ttl_secs: 30, regen_tick_secs: 1 };
        assert_eq!(Workforce::seeded(&short).otp_ttl(), Duration::seconds(30));
    }

    #[test]
    fn unknown_actor_is_unauthorized() {
        let wf = workforce();
        assert_eq!(wf.actor("nobody").unwrap_err().kind, AppErrorKind::Unauthorized);
    }
}
