pub mod attendance;
pub mod auth;
pub mod bills;
pub mod campaigns;
pub mod locations;
pub mod shifts;
pub mod snapshot;
pub mod users;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;

/// Build the REST API router. Sign-in sits behind `login_limit`.
pub fn api_router(login_limit: RateLimitState) -> Router<AppState> {
    let login = Router::new()
        .route("/api/auth/login", post(auth::login))
        .layer(axum::middleware::from_fn_with_state(
            login_limit,
            rate_limit_middleware,
        ));

    Router::new()
        .merge(login)
        // Session
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/switch", post(auth::switch_user))
        // Users
        .route("/api/users", get(users::list_users).post(users::add_employee))
        .route("/api/users/{id}/status", patch(users::update_user_status))
        // Bills
        .route("/api/bills", get(bills::list_bills).post(bills::submit_bill))
        .route("/api/bills/analyze", post(bills::analyze_receipt))
        .route("/api/bills/{id}/status", patch(bills::update_bill_status))
        // Shifts
        .route(
            "/api/shifts",
            get(shifts::list_shift_requests).post(shifts::request_shift_action),
        )
        .route("/api/shifts/mine", delete(shifts::cancel_shift_request))
        .route("/api/shifts/confirm", post(shifts::confirm_shift_action))
        .route("/api/shifts/{id}", delete(shifts::deny_shift_request))
        .route("/api/shifts/{id}/otp", post(shifts::generate_shift_otp))
        // Attendance
        .route("/api/attendance", get(attendance::list_attendance))
        // Campaigns
        .route(
            "/api/campaigns",
            get(campaigns::list_campaigns).post(campaigns::add_campaign),
        )
        .route("/api/campaigns/seo", post(campaigns::seo_suggestions))
        .route("/api/campaigns/{id}/status", patch(campaigns::update_campaign_status))
        // Locations
        .route("/api/locations", get(locations::list_locations))
        .route("/api/locations/me", put(locations::update_location))
        .route("/api/locations/sharing", put(locations::set_sharing))
        .route("/api/locations/sharing/toggle", post(locations::toggle_sharing))
        // Read model
        .route("/api/snapshot", get(snapshot::get_snapshot))
}
