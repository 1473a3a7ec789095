use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    Router,
};
use logbook_store::app_config::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod cargo;
pub mod error;
pub mod fitness;
pub mod health;
pub mod locations;
pub mod middleware;
pub mod seed;
pub mod state;
pub mod users;
pub mod visitors;

pub use state::AppState;

/// Full router: health and login are public, everything else needs a bearer token.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth::routes())
        .merge(visitors::routes())
        .merge(cargo::routes())
        .merge(fitness::routes())
        .merge(users::routes())
        .merge(locations::routes())
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new()
        .merge(health::routes())
        .merge(auth::public_routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
}

/// Optional text fields arrive as `""` from most forms.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
