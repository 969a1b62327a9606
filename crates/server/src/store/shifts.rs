use chrono::{DateTime, Utc};
use rand::Rng;
use shared_types::{
    attendance::is_checked_in, AppError, Coordinates, ShiftRequest, ShiftRequestType,
};

use super::{new_id, Workforce};

fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

impl Workforce {
    /// Ask the owner to authorize a shift start or stop.
    pub fn request_shift_action(
        &mut self,
        actor_id: &str,
        kind: ShiftRequestType,
        now: DateTime<Utc>,
    ) -> Result<ShiftRequest, AppError> {
        let actor = self.actor(actor_id)?;
        if self.shift_requests.iter().any(|r| r.employee_id == actor.id) {
            return Err(AppError::conflict("A shift request is already awaiting authorization."));
        }
        let on_shift = is_checked_in(&self.attendance, &actor.id);
        match kind {
            ShiftRequestType::Start if on_shift => {
                return Err(AppError::conflict("You are already on shift."));
            }
            ShiftRequestType::Stop if !on_shift => {
                return Err(AppError::conflict("You are not on shift."));
            }
            _ => {}
        }
        let request = ShiftRequest {
            id: new_id(),
            employee_id: actor.id.clone(),
            employee_name: actor.name.clone(),
            kind,
            otp: None,
            otp_expires_at: None,
            created_at: now,
        };
        self.shift_requests.push(request.clone());
        Ok(request)
    }

    /// Withdraw every request the actor has open. Returns how many went.
    pub fn cancel_shift_request(&mut self, actor_id: &str) -> Result<usize, AppError> {
        self.actor(actor_id)?;
        let before = self.shift_requests.len();
        self.shift_requests.retain(|r| r.employee_id != actor_id);
        Ok(before - self.shift_requests.len())
    }

    pub fn deny_shift_request(&mut self, actor_id: &str, request_id: &str) -> Result<(), AppError> {
        self.owner(actor_id)?;
        let before = self.shift_requests.len();
        self.shift_requests.retain(|r| r.id != request_id);
        if before == self.shift_requests.len() {
            return Err(AppError::not_found("Shift request not found"));
        }
        Ok(())
    }

    /// Issue (or reissue) the six-digit code for a request.
    pub fn generate_shift_otp(
        &mut self,
        actor_id: &str,
        request_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ShiftRequest, AppError> {
        self.owner(actor_id)?;
        let ttl = self.otp_ttl;
        let request = self
            .shift_requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| AppError::not_found("Shift request not found"))?;
        request.otp = Some(generate_otp());
        request.otp_expires_at = Some(now + ttl);
        Ok(request.clone())
    }

    /// Redeem a code for the actor's pending request.
    ///
    /// Failures are checked in a fixed order and each has one message:
    /// no request, no code yet, code expired, code wrong.
    pub fn confirm_shift_action(
        &mut self,
        actor_id: &str,
        otp: &str,
        location: Option<Coordinates>,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        self.actor(actor_id)
            .map_err(|_| AppError::unauthorized("No user session"))?;
        let request = self
            .shift_requests
            .iter()
            .find(|r| r.employee_id == actor_id)
            .cloned()
            .ok_or_else(|| AppError::bad_request("No active request"))?;

        let (Some(code), Some(expires_at)) = (request.otp.as_deref(), request.otp_expires_at) else {
            return Err(AppError::bad_request("OTP not yet generated by Admin"));
        };
        if now > expires_at {
            return Err(AppError::bad_request("OTP has expired."));
        }
        if code != otp.trim() {
            return Err(AppError::bad_request("Invalid OTP code"));
        }

        match request.kind {
            ShiftRequestType::Start => {
                self.check_in(actor_id, location, now)?;
                self.sharing.insert(actor_id.to_string());
            }
            ShiftRequestType::Stop => {
                self.check_out(actor_id, location, now)?;
                self.sharing.remove(actor_id);
            }
        }
        self.shift_requests.retain(|r| r.id != request.id);
        tracing::info!(employee_id = actor_id, kind = request.kind.as_str(), "Shift transition authorized");
        Ok("Shift transition authorized.".to_string())
    }

    /// Replace every issued code that has lapsed. Requests still waiting
    /// for their first code are left alone.
    pub fn regenerate_expired_otps(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.otp_ttl;
        let mut renewed = 0;
        for request in self.shift_requests.iter_mut() {
            if request.otp.is_some() && request.is_otp_expired(now) {
                request.otp = Some(generate_otp());
                request.otp_expires_at = Some(now + ttl);
                renewed += 1;
            }
        }
        renewed
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use chrono::Duration;
    use shared_types::AppErrorKind;

    fn code_for(wf: &Workforce, employee: &str) -> String {
        wf.shift_requests()
            .iter()
            .find(|r| r.employee_id == employee)
            .and_then(|r| r.otp.clone())
            .unwrap()
    }

    #[test]
    fn full_start_then_stop_handshake() {
        let mut wf = workforce();
        let req = wf.request_shift_action(SARAH, ShiftRequestType::Start, t0()).unwrap();
        wf.generate_shift_otp(OWNER, &req.id, t0()).unwrap();
        let code = code_for(&wf, SARAH);
        assert_eq!(code.len(), 6);

        let here = Some(Coordinates { lat: 13.0, lng: 80.2 });
        let msg = wf.confirm_shift_action(SARAH, &code, here, t0()).unwrap();
        assert_eq!(msg, "Shift transition authorized.");
        assert!(wf.shift_requests().is_empty());
        assert!(wf.is_sharing(SARAH));
        assert!(is_checked_in(wf.attendance(), SARAH));

        let later = t0() + Duration::hours(8);
        let req = wf.request_shift_action(SARAH, ShiftRequestType::Stop, later).unwrap();
        wf.generate_shift_otp(OWNER, &req.id, later).unwrap();
        let code = code_for(&wf, SARAH);
        wf.confirm_shift_action(SARAH, &code, None, later).unwrap();
        assert!(!wf.is_sharing(SARAH));
        assert!(!is_checked_in(wf.attendance(), SARAH));
        assert_eq!(wf.attendance()[0].format_duration(), "8.00");
    }

    #[test]
    fn confirm_errors_follow_fixed_order() {
        let mut wf = workforce();
        let err = wf.confirm_shift_action(SARAH, "123456", None, t0()).unwrap_err();
        assert_eq!(err.message, "No active request");

        let req = wf.request_shift_action(SARAH, ShiftRequestType::Start, t0()).unwrap();
        let err = wf.confirm_shift_action(SARAH, "123456", None, t0()).unwrap_err();
        assert_eq!(err.message, "OTP not yet generated by Admin");

        wf.generate_shift_otp(OWNER, &req.id, t0()).unwrap();
        let code = code_for(&wf, SARAH);
        let err = wf
            .confirm_shift_action(SARAH, &code, None, t0() + Duration::seconds(121))
            .unwrap_err();
        assert_eq!(err.message, "OTP has expired.");

        let wrong = if code == "100000" { "100001" } else { "100000" };
        let err = wf.confirm_shift_action(SARAH, wrong, None, t0()).unwrap_err();
        assert_eq!(err.message, "Invalid OTP code");
        assert_eq!(wf.shift_requests().len(), 1);
    }

    #[test]
    fn unknown_actor_has_no_session() {
        let mut wf = workforce();
        let err = wf.confirm_shift_action("ghost", "123456", None, t0()).unwrap_err();
        assert_eq!(err.message, "No user session");
    }

    #[test]
    fn one_request_per_employee_and_state_must_fit() {
        let mut wf = workforce();
        assert_eq!(
            wf.request_shift_action(SARAH, ShiftRequestType::Stop, t0()).unwrap_err().kind,
            AppErrorKind::Conflict
        );
        wf.request_shift_action(SARAH, ShiftRequestType::Start, t0()).unwrap();
        assert_eq!(
            wf.request_shift_action(SARAH, ShiftRequestType::Start, t0()).unwrap_err().kind,
            AppErrorKind::Conflict
        );
        assert_eq!(wf.cancel_shift_request(SARAH).unwrap(), 1);
        assert!(wf.shift_requests().is_empty());
    }

    #[test]
    fn only_owner_issues_or_denies() {
        let mut wf = workforce();
        let req = wf.request_shift_action(MARCUS, ShiftRequestType::Start, t0()).unwrap();
        assert_eq!(
            wf.generate_shift_otp(SARAH, &req.id, t0()).unwrap_err().kind,
            AppErrorKind::Forbidden
        );
        assert_eq!(
            wf.generate_shift_otp(OWNER, "nope", t0()).unwrap_err().kind,
            AppErrorKind::NotFound
        );
        wf.deny_shift_request(OWNER, &req.id).unwrap();
        assert!(wf.shift_requests().is_empty());
        assert!(wf.deny_shift_request(OWNER, &req.id).is_err());
    }

    #[test]
    fn ticker_renews_only_lapsed_codes() {
        let mut wf = workforce();
        let issued = wf.request_shift_action(SARAH, ShiftRequestType::Start, t0()).unwrap();
        wf.request_shift_action(MARCUS, ShiftRequestType::Start, t0()).unwrap();
        wf.generate_shift_otp(OWNER, &issued.id, t0()).unwrap();

        assert_eq!(wf.regenerate_expired_otps(t0() + Duration::seconds(120)), 0);

        let later = t0() + Duration::seconds(121);
        assert_eq!(wf.regenerate_expired_otps(later), 1);
        let renewed = wf.shift_requests().iter().find(|r| r.id == issued.id).unwrap();
        assert_eq!(renewed.otp_expires_at, Some(later + Duration::seconds(120)));
        let waiting = wf.shift_requests().iter().find(|r| r.employee_id == MARCUS).unwrap();
        assert!(waiting.otp.is_none());
    }
}
