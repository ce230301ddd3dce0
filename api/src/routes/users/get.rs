use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::repositories::UserRepository;
use services::user_service::UserService;
use util::state::AppState;

use crate::auth::extractors::Caller;
use crate::response::ApiResponse;
use crate::routes::assignments::common::UserResponse;
use crate::routes::common::service_error_response;

/// GET /users/admin
///
/// Lists every admin a new assignment can be sent to, ordered by username.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [{ "id": 1, "username": "adminX", "full_name": "Xavier Admin" }],
///   "message": "Admins retrieved successfully"
/// }
/// ```
/// - `401 Unauthorized`
/// - `500 Internal Server Error`
pub async fn list_admins(State(app_state): State<AppState>, Caller(_): Caller) -> Response {
    let service = UserService::new(UserRepository::new(app_state.db_clone()));

    match service.list_admins().await {
        Ok(admins) => {
            let data: Vec<UserResponse> = admins.into_iter().map(UserResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Admins retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => service_error_response(e),
    }
}
