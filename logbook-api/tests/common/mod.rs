use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use logbook_api::{
    app,
    auth::hash_password,
    state::{AppState, AuthConfig},
};
use logbook_core::repository::UserRepository;
use logbook_shared::{NewUser, Role};
use logbook_store::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "admin123";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Empty store with a single unbound administrator.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        store
            .create_user(NewUser {
                username: "admin".to_string(),
                password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
                role: Role::Admin,
                full_name: "System Administrator".to_string(),
                location_id: None,
            })
            .unwrap();

        let state = AppState {
            store: store.clone(),
            auth: AuthConfig {
                secret: "test-secret".to_string(),
                expiration: 3600,
            },
        };

        Self {
            router: app(state),
            store,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {}: {}", username, body);
        body["token"].as_str().expect("No token in body").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login("admin", ADMIN_PASSWORD).await
    }

    /// Create a site as admin and return its id.
    pub async fn create_location(&self, admin: &str, name: &str, code: &str) -> u64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/locations",
                Some(admin),
                Some(json!({ "name": name, "code": code, "address": "" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_u64().unwrap()
    }

    /// Create a user as admin and return a token for it.
    pub async fn create_user(
        &self,
        admin: &str,
        username: &str,
        role: &str,
        location_id: Option<u64>,
    ) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/users",
                Some(admin),
                Some(json!({
                    "username": username,
                    "password": "secret1",
                    "role": role,
                    "full_name": username,
                    "location_id": location_id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        self.login(username, "secret1").await
    }
}

#[allow(dead_code)]
pub fn visitor_body(name: &str) -> Value {
    json!({
        "name": name,
        "id_number": "12345678",
        "area_of_visit": "Terminal A",
        "company_from": "ABC Logistics",
        "purpose": "Cargo inspection",
        "badge_number": "B001",
    })
}
