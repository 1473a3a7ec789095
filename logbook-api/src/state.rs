use std::sync::Arc;
use logbook_core::repository::LogbookStore;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LogbookStore>,
    pub auth: AuthConfig,
}
