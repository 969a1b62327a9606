use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};
use shared_types::{
    avatar_for, display_name_from_email, AppError, NewEmployeeRequest, User, UserRole, UserStatus,
};

use super::{new_id, Workforce};

const INVALID_CREDENTIALS: &str = "Invalid credentials for the specified endpoint.";

/// SHA-256 hex digest of a session token. Only digests are kept in memory.
pub fn hash_token(raw_token: &str) -> String {
    hex::encode(Sha256::digest(raw_token.as_bytes()))
}

fn new_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

impl Workforce {
    /// Sign in by email, auto-provisioning unknown addresses as employees.
    ///
    /// Returns the raw session token (hand it to the client once) and the
    /// signed-in user.
    pub fn login(&mut self, email: &str, password: Option<&str>) -> Result<(String, User), AppError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::bad_request("Please provide a valid workspace identity."));
        }

        let user = match self.users.iter().find(|u| u.email.to_lowercase() == email) {
            Some(existing) => {
                if existing.status == UserStatus::Disabled {
                    return Err(AppError::forbidden("Account access denied by administrator."));
                }
                if let Some(hash) = existing.password_hash.as_deref() {
                    if !password.is_some_and(|p| verify_password(p, hash)) {
                        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
                    }
                }
                existing.clone()
            }
            None => {
                let prefix = email.split('@').next().unwrap_or_default().to_string();
                let user = User {
                    id: new_id(),
                    name: display_name_from_email(&email),
                    email: email.clone(),
                    role: UserRole::Employee,
                    status: UserStatus::Active,
                    avatar: avatar_for(&prefix),
                    designation: "Staff Member".to_string(),
                    mobile: None,
                    password_hash: None,
                };
                tracing::info!(user_id = %user.id, "Auto-provisioned employee on first login");
                self.users.push(user.clone());
                user
            }
        };

        let token = new_session_token();
        self.sessions.insert(hash_token(&token), user.id.clone());
        Ok((token, user))
    }

    /// The user behind a raw session token.
    pub fn resolve_session(&self, token: &str) -> Result<User, AppError> {
        let user_id = self
            .sessions
            .get(&hash_token(token))
            .ok_or_else(|| AppError::unauthorized("Session expired. Please sign in again."))?;
        self.actor(user_id).cloned()
    }

    /// End the session and stop broadcasting the user's location.
    pub fn logout(&mut self, token: &str) {
        if let Some(user_id) = self.sessions.remove(&hash_token(token)) {
            self.sharing.remove(&user_id);
        }
    }

    /// Owner-only: rebind the current session to another active user.
    pub fn switch_user(&mut self, token: &str, actor_id: &str, target_id: &str) -> Result<User, AppError> {
        self.owner(actor_id)?;
        let target = self.user(target_id)?.clone();
        if !target.is_active() {
            return Err(AppError::forbidden("Account access denied by administrator."));
        }
        let key = hash_token(token);
        if !self.sessions.contains_key(&key) {
            return Err(AppError::unauthorized("Session expired. Please sign in again."));
        }
        self.sessions.insert(key, target.id.clone());
        Ok(target)
    }

    pub fn add_employee(&mut self, actor_id: &str, req: NewEmployeeRequest) -> Result<User, AppError> {
        self.owner(actor_id)?;
        let email = req.email.trim().to_lowercase();
        if self.users.iter().any(|u| u.email.to_lowercase() == email) {
            return Err(AppError::conflict("An account with this email already exists"));
        }
        let password_hash = match req.password.as_deref().filter(|p| !p.is_empty()) {
            Some(p) => Some(hash_password(p)?),
            None => None,
        };
        let user = User {
            id: new_id(),
            name: req.name.trim().to_string(),
            avatar: avatar_for(&email),
            email,
            role: UserRole::Employee,
            status: UserStatus::Active,
            designation: req.designation.trim().to_string(),
            mobile: req.mobile.filter(|m| !m.trim().is_empty()),
            password_hash,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Grant or deny access. Denying signs the person out everywhere.
    pub fn toggle_user_status(&mut self, actor_id: &str, user_id: &str, status: UserStatus) -> Result<User, AppError> {
        self.owner(actor_id)?;
        if actor_id == user_id {
            return Err(AppError::bad_request("You cannot change your own access."));
        }
        let user = self.user_mut(user_id)?;
        user.status = status;
        let updated = user.clone();
        if status == UserStatus::Disabled {
            self.sessions.retain(|_, uid| uid != user_id);
            self.sharing.remove(user_id);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use shared_types::AppErrorKind;

    #[test]
    fn known_email_logs_in_case_insensitively() {
        let mut wf = workforce();
        let (token, user) = wf.login("  Sarah@Workforce.com ", None).unwrap();
        assert_eq!(user.id, SARAH);
        assert_eq!(wf.resolve_session(&token).unwrap().id, SARAH);
    }

    #[test]
    fn unknown_email_is_provisioned_as_employee() {
        let mut wf = workforce();
        let (_, user) = wf.login("priya.r_k@acme.in", None).unwrap();
        assert_eq!(user.name, "Priya R K");
        assert_eq!(user.role, UserRole::Employee);
        assert_eq!(user.designation, "Staff Member");
        assert_eq!(user.avatar, "https://picsum.photos/seed/priya.r_k/200");
        assert_eq!(wf.users().len(), 4);

        wf.login("priya.r_k@acme.in", None).unwrap();
        assert_eq!(wf.users().len(), 4);
    }

    #[test]
    fn empty_email_is_rejected() {
        let mut wf = workforce();
        let err = wf.login("   ", None).unwrap_err();
        assert_eq!(err.message, "Please provide a valid workspace identity.");
    }

    #[test]
    fn disabled_user_cannot_log_in_and_loses_sessions() {
        let mut wf = workforce();
        let (token, _) = wf.login("marcus@workforce.com", None).unwrap();
        wf.set_location_sharing(MARCUS, true).unwrap();
        assert!(wf.is_sharing(MARCUS));
        wf.toggle_user_status(OWNER, MARCUS, UserStatus::Disabled).unwrap();

        assert!(!wf.is_sharing(MARCUS));
        assert_eq!(wf.resolve_session(&token).unwrap_err().kind, AppErrorKind::Unauthorized);
        let err = wf.login("marcus@workforce.com", None).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
        assert_eq!(err.message, "Account access denied by administrator.");

        wf.toggle_user_status(OWNER, MARCUS, UserStatus::Active).unwrap();
        assert!(wf.login("marcus@workforce.com", None).is_ok());
    }

    #[test]
    fn owner_cannot_disable_self_and_employees_cannot_toggle() {
        let mut wf = workforce();
        assert_eq!(
            wf.toggle_user_status(OWNER, OWNER, UserStatus::Disabled).unwrap_err().kind,
            AppErrorKind::BadRequest
        );
        assert_eq!(
            wf.toggle_user_status(SARAH, MARCUS, UserStatus::Disabled).unwrap_err().kind,
            AppErrorKind::Forbidden
        );
    }

    #[test]
    fn added_employee_with_password_must_supply_it() {
        let mut wf = workforce();
        let user = wf
            .add_employee(
                OWNER,
                NewEmployeeRequest {
                    name: "Dev Patel".into(),
                    email: "Dev@Workforce.com".into(),
                    designation: "Analyst".into(),
                    mobile: Some("  ".into()),
                    password: Some("hunter22".into()),
                },
            )
            .unwrap();
        assert_eq!(user.email, "dev@workforce.com");
        assert_eq!(user.avatar, "https://picsum.photos/seed/dev@workforce.com/200");
        assert!(user.mobile.is_none());

        assert_eq!(wf.login("dev@workforce.com", None).unwrap_err().message, INVALID_CREDENTIALS);
        assert_eq!(
            wf.login("dev@workforce.com", Some("wrong")).unwrap_err().kind,
            AppErrorKind::Unauthorized
        );
        assert!(wf.login("dev@workforce.com", Some("hunter22")).is_ok());
    }

    #[test]
    fn duplicate_employee_email_conflicts() {
        let mut wf = workforce();
        let err = wf
            .add_employee(
                OWNER,
                NewEmployeeRequest {
                    name: "Sarah Again".into(),
                    email: "sarah@workforce.com".into(),
                    designation: "x".into(),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[test]
    fn switch_user_rebinds_session_to_active_target() {
        let mut wf = workforce();
        let (token, _) = wf.login("owner@workforce.com", None).unwrap();
        let switched = wf.switch_user(&token, OWNER, SARAH).unwrap();
        assert_eq!(switched.id, SARAH);
        assert_eq!(wf.resolve_session(&token).unwrap().id, SARAH);

        let (token, _) = wf.login("owner@workforce.com", None).unwrap();
        wf.toggle_user_status(OWNER, MARCUS, UserStatus::Disabled).unwrap();
        assert!(wf.switch_user(&token, OWNER, MARCUS).is_err());
    }

    #[test]
    fn logout_ends_session() {
        let mut wf = workforce();
        let (token, _) = wf.login("sarah@workforce.com", None).unwrap();
        wf.set_location_sharing(SARAH, true).unwrap();
        assert!(wf.is_sharing(SARAH));
        wf.logout(&token);
        assert!(wf.resolve_session(&token).is_err());
        assert!(!wf.is_sharing(SARAH));
    }

    #[test]
    fn token_digest_is_hex_sha256() {
        let digest = hash_token("abc");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hash_token("abc"));
        assert_ne!(digest, hash_token("abd"));
    }
}
