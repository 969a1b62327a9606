use dioxus::prelude::*;
use shared_types::{User, UserRole};

/// Global authentication state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<User>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn set_user(&mut self, user: User) {
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }

    /// Role of the signed-in user; guests when nobody is signed in.
    pub fn role(&self) -> UserRole {
        self.current_user
            .read()
            .as_ref()
            .map(|u| u.role)
            .unwrap_or(UserRole::Guest)
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

pub fn use_is_owner() -> bool {
    use_auth().role().is_owner()
}

/// Sign out on the server, drop local state and return to the login page.
pub async fn sign_out(mut auth: AuthState) {
    if let Err(e) = server::api::logout().await {
        tracing::warn!(error = %e, "Logout call failed; clearing local session anyway");
    }
    auth.clear_auth();
    navigator().replace(crate::routes::Route::Login {});
}
