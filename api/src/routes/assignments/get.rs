use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use util::state::AppState;

use crate::auth::extractors::Caller;
use crate::response::ApiResponse;
use crate::routes::assignments::common::{AssignmentResponse, assignment_service};
use crate::routes::common::service_error_response;

/// GET /assignments
///
/// Regular users get the assignments they created, each with its admins.
/// Admins get the assignments they are asked to review, without the admin list.
/// Newest first.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "user": { "id": 2, "username": "alice", "full_name": "Alice Anders" },
///       "task": "Review doc",
///       "assigned_admins": [{ "id": 1, "username": "adminX", "full_name": "Xavier Admin" }],
///       "status": "pending",
///       "feedback": "",
///       "created_at": "2025-10-18T09:00:00Z",
///       "updated_at": "2025-10-18T09:00:00Z"
///     }
///   ],
///   "message": "Assignments retrieved successfully"
/// }
/// ```
/// - `401 Unauthorized`
/// - `500 Internal Server Error`
pub async fn list_assignments(
    State(app_state): State<AppState>,
    Caller(identity): Caller,
) -> Response {
    match assignment_service(&app_state).list(identity).await {
        Ok(views) => {
            let data: Vec<AssignmentResponse> =
                views.into_iter().map(AssignmentResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Assignments retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => service_error_response(e),
    }
}
