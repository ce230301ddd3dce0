use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::{models::user::Model as UserModel, repositories::UserRepository};
use serde::{Deserialize, Serialize};
use services::auth_service::{AuthService, RegisterUser};
use util::{config, state::AppState};
use validator::Validate;

use crate::auth::{generate_jwt, guards::Empty};
use crate::response::ApiResponse;
use crate::routes::common::{service_error_response, validation_error_response};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,

    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Self-service admin signup. Honoured everywhere except `APP_ENV=production`.
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

impl UserResponse {
    fn with_token(user: UserModel) -> Result<Self, Response> {
        let (token, expires_at) = generate_jwt(user.id, user.admin).map_err(|e| {
            tracing::error!(error = %e, user_id = user.id, "Token encoding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Internal server error")),
            )
                .into_response()
        })?;

        Ok(Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            admin: user.admin,
            token,
            expires_at,
        })
    }
}

/// POST /auth/register
///
/// ### Request Body
/// ```json
/// { "username": "alice", "full_name": "Alice Anders", "password": "strongpassword", "admin": false }
/// ```
///
/// Public route: any caller may register, including as an admin. In production
/// (`APP_ENV=production`) `admin: true` is refused.
///
/// ### Responses
/// - `201 Created` with the user and a token
/// - `400 Bad Request` (validation failure)
/// - `403 Forbidden` ("Admin accounts cannot be self-registered in production")
/// - `409 Conflict` ("A user with this username already exists")
/// - `500 Internal Server Error`
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors);
    }
    if req.admin && config::env() == "production" {
        tracing::warn!(username = %req.username, "Refused admin self-registration");
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Empty>::error(
                "Admin accounts cannot be self-registered in production",
            )),
        )
            .into_response();
    }

    let auth = AuthService::new(UserRepository::new(app_state.db_clone()));
    let user = match auth
        .register(RegisterUser {
            username: req.username,
            full_name: req.full_name,
            password: req.password,
            admin: req.admin,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => return service_error_response(e),
    };

    match UserResponse::with_token(user) {
        Ok(data) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(data, "User registered successfully")),
        )
            .into_response(),
        Err(response) => response,
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /auth/login
///
/// ### Request Body
/// ```json
/// { "username": "alice", "password": "strongpassword" }
/// ```
///
/// ### Responses
/// - `200 OK` with the user and a fresh token
/// - `400 Bad Request` (missing fields)
/// - `401 Unauthorized` ("Invalid username or password")
/// - `500 Internal Server Error`
pub async fn login(State(app_state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors);
    }

    let auth = AuthService::new(UserRepository::new(app_state.db_clone()));
    let user = match auth.verify_credentials(&req.username, &req.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<Empty>::error("Invalid username or password")),
            )
                .into_response();
        }
        Err(e) => return service_error_response(e),
    };

    match UserResponse::with_token(user) {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Login successful")),
        )
            .into_response(),
        Err(response) => response,
    }
}
