use axum::Router;
use shared_types::{
    AnalyzeReceiptRequest, AppError, AppErrorKind, AttendanceRecord,
    Bill, BillDraft, BillFilter, BillStatus, Campaign, CampaignDraft, CampaignMetrics,
    CampaignStatus, CampaignType, ConfirmShiftRequest, Coordinates, LiveLocation, LocationRecord,
    LoginRequest, LoginResponse, MarketingChannel, MessageResponse, NewEmployeeRequest,
    ReceiptAnalysis, SeoRequest, SeoSuggestion, SeoSuggestions, SharingRequest, SharingResponse,
    ShiftActionRequest, ShiftRequest, ShiftRequestType, SwitchUserRequest, TargetLocation,
    UpdateBillStatusRequest, UpdateCampaignStatusRequest, UpdateUserStatusRequest, User,
    UserRole, UserStatus, WorkspaceSnapshot,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health::{self, HealthResponse};
use crate::rate_limit::RateLimitState;
use crate::rest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::auth::login,
        rest::auth::logout,
        rest::auth::me,
        rest::auth::switch_user,
        rest::users::list_users,
        rest::users::add_employee,
        rest::users::update_user_status,
        rest::bills::list_bills,
        rest::bills::submit_bill,
        rest::bills::update_bill_status,
        rest::bills::analyze_receipt,
        rest::shifts::list_shift_requests,
        rest::shifts::request_shift_action,
        rest::shifts::cancel_shift_request,
        rest::shifts::deny_shift_request,
        rest::shifts::generate_shift_otp,
        rest::shifts::confirm_shift_action,
        rest::attendance::list_attendance,
        rest::campaigns::list_campaigns,
        rest::campaigns::add_campaign,
        rest::campaigns::update_campaign_status,
        rest::campaigns::seo_suggestions,
        rest::locations::list_locations,
        rest::locations::update_location,
        rest::locations::set_sharing,
        rest::locations::toggle_sharing,
        rest::snapshot::get_snapshot,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        User, UserRole, UserStatus, LoginRequest, LoginResponse, SwitchUserRequest,
        NewEmployeeRequest, UpdateUserStatusRequest,
        Bill, BillStatus, BillDraft, BillFilter, UpdateBillStatusRequest, AnalyzeReceiptRequest,
        ReceiptAnalysis,
        ShiftRequest, ShiftRequestType, ShiftActionRequest, ConfirmShiftRequest, MessageResponse,
        AttendanceRecord, Coordinates, LocationRecord, LiveLocation,
        SharingRequest, SharingResponse,
        Campaign, CampaignStatus, CampaignType, CampaignDraft, CampaignMetrics, MarketingChannel,
        TargetLocation, SeoRequest, SeoSuggestion, SeoSuggestions,
        WorkspaceSnapshot, HealthResponse,
    )),
    tags(
        (name = "auth", description = "Sign-in and session endpoints"),
        (name = "users", description = "Workspace member management"),
        (name = "bills", description = "Expense claims and receipt analysis"),
        (name = "shifts", description = "OTP-authorized shift start and stop"),
        (name = "attendance", description = "Check-in history"),
        (name = "campaigns", description = "Marketing campaigns and SEO assistant"),
        (name = "locations", description = "Live location sharing"),
        (name = "snapshot", description = "Role-filtered read model"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Workforce API",
        description = "Attendance, expense and field-marketing workspace API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
///
/// The session middleware is applied by the caller so it also covers the
/// Dioxus server functions.
pub fn api_router(state: AppState, login_limit: RateLimitState) -> Router {
    Router::new()
        .merge(rest::api_router(login_limit))
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
