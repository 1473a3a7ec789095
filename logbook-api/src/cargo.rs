use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use logbook_core::{
    filter::CargoFilter,
    policy::authorize,
    repository::CargoRepository,
    scope::{self, LocationScope},
    Action, Identity, Resource,
};
use logbook_shared::{Cargo, CargoCategory, CargoEntry, NewCargo, RecordId};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{error::AppError, non_empty, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CargoRequest {
    pub category: CargoCategory,
    pub seal_number: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub awb_number: String,
    #[validate(length(min = 1))]
    pub uld_numbers: String,
    #[validate(length(min = 1))]
    pub driver_name: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub vehicle_registration: String,
    /// Only honoured on create, and only for callers without a home location.
    pub location_id: Option<RecordId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListCargoQuery {
    pub category: Option<CargoCategory>,
    pub location_id: Option<RecordId>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cargo", get(list_cargo).post(create_cargo))
        .route(
            "/api/cargo/{id}",
            get(get_cargo).put(update_cargo).delete(delete_cargo),
        )
}

async fn list_cargo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ListCargoQuery>,
) -> Result<Json<Vec<CargoEntry>>, AppError> {
    authorize(&identity, Resource::Cargo, Action::View)?;

    let filter = scope::cargo_filter(
        &identity,
        CargoFilter {
            location_id: query.location_id,
            category: query.category,
        },
    );
    Ok(Json(state.store.list_cargo(&filter)))
}

async fn get_cargo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Cargo>, AppError> {
    authorize(&identity, Resource::Cargo, Action::View)?;
    Ok(Json(state.store.get_cargo(id)?))
}

async fn create_cargo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CargoRequest>,
) -> Result<(StatusCode, Json<Cargo>), AppError> {
    authorize(&identity, Resource::Cargo, Action::Create)?;
    req.validate()?;

    let location_id = LocationScope::of(&identity).assign(req.location_id)?;
    let cargo = state.store.create_cargo(NewCargo {
        awb_number: req.awb_number,
        uld_numbers: req.uld_numbers,
        category: req.category,
        description: req.description,
        seal_number: non_empty(req.seal_number),
        driver_name: req.driver_name,
        company: req.company,
        vehicle_registration: req.vehicle_registration,
        location_id,
    })?;

    Ok((StatusCode::CREATED, Json(cargo)))
}

/// Time-in and owning location are kept as recorded.
async fn update_cargo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
    Json(req): Json<CargoRequest>,
) -> Result<Json<Cargo>, AppError> {
    authorize(&identity, Resource::Cargo, Action::Update)?;
    req.validate()?;

    let mut cargo = state.store.get_cargo(id)?;
    cargo.category = req.category;
    cargo.seal_number = non_empty(req.seal_number);
    cargo.description = req.description;
    cargo.awb_number = req.awb_number;
    cargo.uld_numbers = req.uld_numbers;
    cargo.driver_name = req.driver_name;
    cargo.company = req.company;
    cargo.vehicle_registration = req.vehicle_registration;

    Ok(Json(state.store.update_cargo(cargo)?))
}

async fn delete_cargo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Value>, AppError> {
    authorize(&identity, Resource::Cargo, Action::Delete)?;
    state.store.delete_cargo(id)?;
    Ok(Json(json!({ "message": "Cargo deleted successfully" })))
}
