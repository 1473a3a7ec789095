use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use logbook_core::repository::UserRepository;
use logbook_core::Identity;
use logbook_shared::{RecordId, Role};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<RecordId> {
        self.sub.parse().ok()
    }
}

// ============================================================================
// Authentication Middleware
// ============================================================================

/// Verify the bearer token and attach the caller's [`Identity`].
///
/// Role and home location come from the stored user rather than the token,
/// so changes an administrator makes apply on the next request.
pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from Authorization header
    let TypedHeader(Authorization(bearer)) = bearer
        .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

    // 2. Decode and validate JWT
    let token_data = decode::<Claims>(
        bearer.token(),
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        AppError::AuthenticationError("Invalid or expired token".to_string())
    })?;

    // 3. Resolve the current user
    let user = token_data
        .claims
        .user_id()
        .and_then(|id| state.store.get_user(id).ok())
        .ok_or_else(|| AppError::AuthenticationError("User not authenticated".to_string()))?;

    // 4. Inject identity
    req.extensions_mut().insert(Identity::from(&user));

    Ok(next.run(req).await)
}
