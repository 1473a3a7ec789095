use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use logbook_core::{
    filter::AttendanceFilter,
    policy::authorize,
    repository::FitnessRepository,
    scope,
    Action, Identity, Resource,
};
use logbook_shared::{
    AttendanceEntry, FitnessAttendance, FitnessMember, FitnessSession, NewAttendance, NewMember,
    RecordId,
};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct MemberRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub id_number: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub company: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub member_id: RecordId,
    pub session: FitnessSession,
}

#[derive(Debug, Deserialize)]
pub struct CheckOutRequest {
    pub attendance_id: RecordId,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListAttendanceQuery {
    pub session: Option<FitnessSession>,
    /// `YYYY-MM-DD`
    pub date: Option<NaiveDate>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/fitness/members", get(list_members).post(create_member))
        .route(
            "/api/fitness/members/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route("/api/fitness/attendance", get(list_attendance))
        .route(
            "/api/fitness/attendance/{id}",
            get(get_attendance).delete(delete_attendance),
        )
        .route("/api/fitness/checkin", post(check_in))
        .route("/api/fitness/checkout", post(check_out))
}

// ============================================================================
// Member Handlers
// ============================================================================

async fn list_members(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<FitnessMember>>, AppError> {
    authorize(&identity, Resource::FitnessMember, Action::View)?;
    Ok(Json(state.store.list_members()))
}

async fn get_member(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<FitnessMember>, AppError> {
    authorize(&identity, Resource::FitnessMember, Action::View)?;
    Ok(Json(state.store.get_member(id)?))
}

async fn create_member(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<MemberRequest>,
) -> Result<(StatusCode, Json<FitnessMember>), AppError> {
    authorize(&identity, Resource::FitnessMember, Action::Create)?;
    req.validate()?;

    let member = state.store.create_member(NewMember {
        name: req.name,
        id_number: req.id_number,
        phone_number: req.phone_number,
        company: req.company,
    })?;

    Ok((StatusCode::CREATED, Json(member)))
}

async fn update_member(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
    Json(req): Json<MemberRequest>,
) -> Result<Json<FitnessMember>, AppError> {
    authorize(&identity, Resource::FitnessMember, Action::Update)?;
    req.validate()?;

    let mut member = state.store.get_member(id)?;
    member.name = req.name;
    member.id_number = req.id_number;
    member.phone_number = req.phone_number;
    member.company = req.company;

    Ok(Json(state.store.update_member(member)?))
}

async fn delete_member(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Value>, AppError> {
    authorize(&identity, Resource::FitnessMember, Action::Delete)?;
    state.store.delete_member(id)?;
    Ok(Json(json!({ "message": "Member deleted successfully" })))
}

// ============================================================================
// Attendance Handlers
// ============================================================================

async fn list_attendance(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ListAttendanceQuery>,
) -> Result<Json<Vec<AttendanceEntry>>, AppError> {
    authorize(&identity, Resource::FitnessAttendance, Action::View)?;

    let filter = scope::attendance_filter(
        &identity,
        AttendanceFilter {
            session: query.session,
            date: query.date,
        },
    );
    Ok(Json(state.store.list_attendance(&filter)))
}

async fn get_attendance(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<FitnessAttendance>, AppError> {
    authorize(&identity, Resource::FitnessAttendance, Action::View)?;
    Ok(Json(state.store.get_attendance(id)?))
}

/// POST /api/fitness/checkin
async fn check_in(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<AttendanceEntry>), AppError> {
    authorize(&identity, Resource::FitnessAttendance, Action::MutateStatus)?;

    let entry = state.store.check_in(NewAttendance {
        member_id: req.member_id,
        session: req.session,
    })?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/fitness/checkout
async fn check_out(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CheckOutRequest>,
) -> Result<Json<FitnessAttendance>, AppError> {
    authorize(&identity, Resource::FitnessAttendance, Action::MutateStatus)?;
    Ok(Json(state.store.check_out(req.attendance_id)?))
}

async fn delete_attendance(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Value>, AppError> {
    authorize(&identity, Resource::FitnessAttendance, Action::Delete)?;
    state.store.delete_attendance(id)?;
    Ok(Json(json!({ "message": "Attendance deleted successfully" })))
}
