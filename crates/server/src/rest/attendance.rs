use axum::{
    extract::{Query, State},
    Json,
};
use shared_types::{attendance_history, search_attendance, AppError, AttendanceQuery, AttendanceRecord};

use crate::auth::extractors::CurrentUser;
use crate::store::SharedWorkforce;

/// Attendance history for the caller. Owners see everyone's, optionally
/// searched by name or date.
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records", body = Vec<AttendanceRecord>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "attendance"
)]
pub async fn list_attendance(
    State(workforce): State<SharedWorkforce>,
    CurrentUser(session): CurrentUser,
    Query(query): Query<AttendanceQuery>,
) -> Json<Vec<AttendanceRecord>> {
    let wf = workforce.read().await;
    let records = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(term) if session.user.role.is_owner() => search_attendance(wf.attendance(), term),
        _ => attendance_history(wf.attendance(), &session.user),
    };
    Json(records)
}
