use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use logbook_core::repository::UserRepository;
use logbook_core::Identity;
use logbook_shared::{User, UserEntry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppError, middleware::auth::Claims, state::{AppState, AuthConfig}};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserEntry,
    pub expires_at: DateTime<Utc>,
}

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/auth/me", get(current_user))
}

/// Produce an argon2 PHC string for a new or changed password.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

pub fn issue_token(auth: &AuthConfig, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
    let now = Utc::now();
    let expires_at = i64::try_from(auth.expiration)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Token lifetime out of range: {}s",
                auth.expiration
            ))
        })?;

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(auth.secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    Ok((token, expires_at))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate()?;

    let invalid = || AppError::AuthenticationError("Invalid credentials".to_string());

    let user = state.store.find_user_by_username(&req.username).ok_or_else(invalid)?;
    if !verify_password(&req.password, user.password_hash.expose()) {
        tracing::warn!(username = %req.username, "failed login");
        return Err(invalid());
    }

    let (token, expires_at) = issue_token(&state.auth, &user)?;
    tracing::info!(user_id = user.id, role = user.role.as_str(), "user logged in");

    Ok(Json(LoginResponse {
        token,
        user: state.store.hydrate_user(user),
        expires_at,
    }))
}

async fn current_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<UserEntry>, AppError> {
    let user = state.store.get_user(identity.user_id)?;
    Ok(Json(state.store.hydrate_user(user)))
}
