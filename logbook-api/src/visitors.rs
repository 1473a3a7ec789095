use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use logbook_core::{
    filter::VisitorFilter,
    policy::authorize,
    repository::VisitorRepository,
    scope::{self, LocationScope},
    Action, Identity, Resource,
};
use logbook_shared::{NewVisitor, RecordId, Visitor, VisitorEntry, VisitorStatus};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{error::AppError, non_empty, state::AppState};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVisitorRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub id_number: String,
    #[validate(length(min = 1))]
    pub area_of_visit: String,
    pub company_from: Option<String>,
    #[validate(length(min = 1))]
    pub purpose: String,
    #[validate(length(min = 1))]
    pub badge_number: String,
    /// Only honoured for callers without a home location.
    pub location_id: Option<RecordId>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVisitorRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub id_number: String,
    #[validate(length(min = 1))]
    pub area_of_visit: String,
    pub company_from: Option<String>,
    #[validate(length(min = 1))]
    pub purpose: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1))]
    pub badge_number: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListVisitorsQuery {
    pub status: Option<VisitorStatus>,
    pub location_id: Option<RecordId>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/visitors", get(list_visitors).post(create_visitor))
        .route(
            "/api/visitors/{id}",
            get(get_visitor).put(update_visitor).delete(delete_visitor),
        )
        .route("/api/visitors/{id}/signin", post(sign_in_visitor))
        .route("/api/visitors/{id}/signout", post(sign_out_visitor))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/visitors
async fn list_visitors(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ListVisitorsQuery>,
) -> Result<Json<Vec<VisitorEntry>>, AppError> {
    authorize(&identity, Resource::Visitor, Action::View)?;

    let filter = scope::visitor_filter(
        &identity,
        VisitorFilter {
            location_id: query.location_id,
            status: query.status,
        },
    );
    Ok(Json(state.store.list_visitors(&filter)))
}

/// GET /api/visitors/{id}
/// Not location-scoped; only lists are.
async fn get_visitor(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Visitor>, AppError> {
    authorize(&identity, Resource::Visitor, Action::View)?;
    Ok(Json(state.store.get_visitor(id)?))
}

/// POST /api/visitors
async fn create_visitor(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateVisitorRequest>,
) -> Result<(StatusCode, Json<Visitor>), AppError> {
    authorize(&identity, Resource::Visitor, Action::Create)?;
    req.validate()?;

    let location_id = LocationScope::of(&identity).assign(req.location_id)?;
    let visitor = state.store.create_visitor(NewVisitor {
        name: req.name,
        id_number: req.id_number,
        area_of_visit: req.area_of_visit,
        company_from: non_empty(req.company_from),
        purpose: req.purpose,
        badge_number: req.badge_number,
        location_id,
    })?;

    Ok((StatusCode::CREATED, Json(visitor)))
}

/// POST /api/visitors/{id}/signin
/// Not location-scoped: the front desk may act on any site's visitor.
async fn sign_in_visitor(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<Visitor>, AppError> {
    authorize(&identity, Resource::Visitor, Action::MutateStatus)?;
    req.validate()?;

    Ok(Json(state.store.sign_in_visitor(id, req.badge_number)?))
}

/// POST /api/visitors/{id}/signout
/// Not location-scoped, like sign-in.
async fn sign_out_visitor(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Visitor>, AppError> {
    authorize(&identity, Resource::Visitor, Action::MutateStatus)?;
    Ok(Json(state.store.sign_out_visitor(id)?))
}

/// PUT /api/visitors/{id}
/// Descriptive fields only; status and badge go through sign-in/sign-out.
async fn update_visitor(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
    Json(req): Json<UpdateVisitorRequest>,
) -> Result<Json<Visitor>, AppError> {
    authorize(&identity, Resource::Visitor, Action::Update)?;
    req.validate()?;

    let mut visitor = state.store.get_visitor(id)?;
    visitor.name = req.name;
    visitor.id_number = req.id_number;
    visitor.area_of_visit = req.area_of_visit;
    visitor.company_from = non_empty(req.company_from);
    visitor.purpose = req.purpose;

    Ok(Json(state.store.update_visitor(visitor)?))
}

/// DELETE /api/visitors/{id}
async fn delete_visitor(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Value>, AppError> {
    authorize(&identity, Resource::Visitor, Action::Delete)?;
    state.store.delete_visitor(id)?;
    Ok(Json(json!({ "message": "Visitor deleted successfully" })))
}
