use api::{auth::generate_jwt, routes::routes};
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use db::{models::user::Model as UserModel, repositories::UserRepository, test_utils::setup_test_db};
use serde_json::Value;
use services::auth_service::{AuthService, RegisterUser};
use util::{config::AppConfig, state::AppState};

pub const TEST_PASSWORD: &str = "password123";

/// Fresh router over a migrated in-memory database, with a known JWT secret
/// and the default lifecycle policy.
pub async fn make_test_app() -> (Router, AppState) {
    AppConfig::set_jwt_secret("integration-test-secret");
    AppConfig::set_jwt_duration_minutes(60u64);
    AppConfig::set_strict_assignment_lifecycle(false);
    AppConfig::set_env("development");

    let app_state = AppState::new(setup_test_db().await);
    let router = Router::new().nest("/api", routes(app_state.clone()));
    (router, app_state)
}

pub async fn create_user(app_state: &AppState, username: &str, full_name: &str, admin: bool) -> UserModel {
    AuthService::new(UserRepository::new(app_state.db_clone()))
        .register(RegisterUser {
            username: username.to_string(),
            full_name: full_name.to_string(),
            password: TEST_PASSWORD.to_string(),
            admin,
        })
        .await
        .expect("Failed to create test user")
}

pub fn token_for(user: &UserModel) -> String {
    generate_jwt(user.id, user.admin).expect("Failed to sign token").0
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn post_empty(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get_json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
