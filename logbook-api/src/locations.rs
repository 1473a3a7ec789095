use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use logbook_core::{
    policy::authorize, repository::LocationRepository, Action, Identity, Resource,
};
use logbook_shared::{Location, NewLocation, RecordId};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{error::AppError, non_empty, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
    #[serde(default)]
    pub address: String,
}

/// Missing or empty fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub address: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/locations", get(list_locations).post(create_location))
        .route(
            "/api/locations/{id}",
            get(get_location).put(update_location).delete(delete_location),
        )
}

async fn list_locations(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Location>>, AppError> {
    authorize(&identity, Resource::Location, Action::View)?;
    Ok(Json(state.store.list_locations()))
}

async fn get_location(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Location>, AppError> {
    authorize(&identity, Resource::Location, Action::View)?;
    Ok(Json(state.store.get_location(id)?))
}

async fn create_location(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>), AppError> {
    authorize(&identity, Resource::Location, Action::Create)?;
    req.validate()?;

    let location = state.store.create_location(NewLocation {
        name: req.name,
        code: req.code,
        address: req.address,
    })?;

    Ok((StatusCode::CREATED, Json(location)))
}

async fn update_location(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
    Json(req): Json<UpdateLocationRequest>,
) -> Result<Json<Location>, AppError> {
    authorize(&identity, Resource::Location, Action::Update)?;

    let mut location = state.store.get_location(id)?;
    if let Some(name) = non_empty(req.name) {
        location.name = name;
    }
    if let Some(code) = non_empty(req.code) {
        location.code = code;
    }
    if let Some(address) = req.address {
        location.address = address;
    }

    Ok(Json(state.store.update_location(location)?))
}

async fn delete_location(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Value>, AppError> {
    authorize(&identity, Resource::Location, Action::Delete)?;
    state.store.delete_location(id)?;
    Ok(Json(json!({ "message": "Location deleted successfully" })))
}
