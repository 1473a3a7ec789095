use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use logbook_core::{
    policy::authorize,
    repository::{LocationRepository, UserRepository},
    Action, Identity, Resource,
};
use logbook_shared::{NewUser, RecordId, Role, User, UserEntry};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use validator::Validate;

use crate::{auth::hash_password, error::AppError, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: Role,
    #[validate(length(min = 1))]
    pub full_name: String,
    pub location_id: Option<RecordId>,
}

/// Empty or missing username, password and full name keep the old value.
/// Role is always replaced. The home location only changes when
/// `location_id` is present: a number rebinds, `null` unbinds.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    pub role: Role,
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub location_id: Option<Option<RecordId>>,
}

/// Tells an explicit `null` apart from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn ensure_location(state: &AppState, location_id: Option<RecordId>) -> Result<(), AppError> {
    if let Some(id) = location_id {
        state.store.get_location(id)?;
    }
    Ok(())
}

async fn list_users(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<UserEntry>>, AppError> {
    authorize(&identity, Resource::User, Action::View)?;
    Ok(Json(state.store.list_users()))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<User>, AppError> {
    authorize(&identity, Resource::User, Action::View)?;
    Ok(Json(state.store.get_user(id)?))
}

async fn create_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    authorize(&identity, Resource::User, Action::Create)?;
    req.validate()?;
    ensure_location(&state, req.location_id)?;

    let user = state.store.create_user(NewUser {
        username: req.username,
        password_hash: hash_password(&req.password)?,
        role: req.role,
        full_name: req.full_name,
        location_id: req.location_id,
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    authorize(&identity, Resource::User, Action::Update)?;
    req.validate()?;

    let mut user = state.store.get_user(id)?;
    if let Some(location_id) = req.location_id {
        ensure_location(&state, location_id)?;
        user.location_id = location_id;
    }

    if let Some(username) = req.username.filter(|u| !u.is_empty()) {
        user.username = username;
    }

    if let Some(password) = req.password.filter(|p| !p.is_empty()) {
        user.password_hash = hash_password(&password)?.into();
    }

    user.role = req.role;
    if let Some(full_name) = req.full_name.filter(|n| !n.is_empty()) {
        user.full_name = full_name;
    }

    Ok(Json(state.store.update_user_unique(user)?))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<RecordId>,
) -> Result<Json<Value>, AppError> {
    authorize(&identity, Resource::User, Action::Delete)?;

    if identity.user_id == id {
        return Err(AppError::ValidationError("Cannot delete your own account".to_string()));
    }

    state.store.delete_user(id)?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
