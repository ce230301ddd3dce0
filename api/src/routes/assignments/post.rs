use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::assignment_service::{AssignmentView, CreateAssignment, UpdateAssignment};
use services::ServiceError;
use util::state::AppState;
use validator::Validate;

use crate::auth::{extractors::Caller, guards::Empty};
use crate::response::ApiResponse;
use crate::routes::assignments::common::{AssignmentResponse, assignment_service};
use crate::routes::common::{service_error_response, validation_error_response};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1, message = "Task is required"))]
    pub task: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one admin must be assigned"))]
    pub assigned_admins: Vec<String>,
}

/// Both fields are optional; empty values keep what is stored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub assigned_admins: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub feedback: Option<String>,
}

fn respond(result: Result<AssignmentView, ServiceError>, status: StatusCode, message: &str) -> Response {
    match result {
        Ok(view) => (
            status,
            Json(ApiResponse::success(AssignmentResponse::from(view), message)),
        )
            .into_response(),
        Err(e) => service_error_response(e),
    }
}

/// POST /assignments/create
///
/// ### Request Body
/// ```json
/// { "task": "Review doc", "assigned_admins": ["adminX"] }
/// ```
///
/// ### Responses
/// - `201 Created` with the new assignment (status `pending`)
/// - `400 Bad Request` ("One or more admin usernames are invalid or users are not admins")
/// - `403 Forbidden` ("Admins cannot create assignments")
/// - `500 Internal Server Error`
pub async fn create_assignment(
    State(app_state): State<AppState>,
    Caller(identity): Caller,
    Json(req): Json<CreateAssignmentRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors);
    }

    let result = assignment_service(&app_state)
        .create(
            identity,
            CreateAssignment {
                task: req.task,
                assigned_admins: req.assigned_admins,
            },
        )
        .await;

    respond(result, StatusCode::CREATED, "Assignment created successfully")
}

/// POST /assignments/update/{id}
///
/// Creator only. Replaces the task and/or the whole admin set.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request`, `403 Forbidden`, `404 Not Found`
/// - `409 Conflict` when decisions are terminal and the assignment was decided
pub async fn update_assignment(
    State(app_state): State<AppState>,
    Caller(identity): Caller,
    Path(assignment_id): Path<i64>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> Response {
    let result = assignment_service(&app_state)
        .update(
            identity,
            assignment_id,
            UpdateAssignment {
                task: req.task,
                assigned_admins: req.assigned_admins,
            },
        )
        .await;

    respond(result, StatusCode::OK, "Assignment updated successfully")
}

/// POST /assignments/delete/{id}
///
/// Creator only.
///
/// ### Responses
/// - `200 OK` ("Assignment deleted successfully")
/// - `403 Forbidden`, `404 Not Found`
pub async fn delete_assignment(
    State(app_state): State<AppState>,
    Caller(identity): Caller,
    Path(assignment_id): Path<i64>,
) -> Response {
    match assignment_service(&app_state)
        .delete(identity, assignment_id)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<Empty>::success(
                Empty,
                "Assignment deleted successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error_response(e),
    }
}

/// POST /assignments/accept/{id}
///
/// Assigned admins only. The body is optional:
/// ```json
/// { "feedback": "looks good" }
/// ```
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` ("Assignment not found or you're not authorized")
/// - `409 Conflict` when decisions are terminal
pub async fn accept_assignment(
    State(app_state): State<AppState>,
    Caller(identity): Caller,
    Path(assignment_id): Path<i64>,
    body: Option<Json<DecisionRequest>>,
) -> Response {
    let feedback = body.and_then(|Json(b)| b.feedback);
    let result = assignment_service(&app_state)
        .accept(identity, assignment_id, feedback)
        .await;

    respond(result, StatusCode::OK, "Assignment accepted successfully")
}

/// POST /assignments/reject/{id}
///
/// Assigned admins only. Feedback is mandatory:
/// ```json
/// { "feedback": "incomplete" }
/// ```
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` ("Feedback is required when rejecting an assignment")
/// - `404 Not Found`, `409 Conflict`
pub async fn reject_assignment(
    State(app_state): State<AppState>,
    Caller(identity): Caller,
    Path(assignment_id): Path<i64>,
    body: Option<Json<DecisionRequest>>,
) -> Response {
    let feedback = body.and_then(|Json(b)| b.feedback);
    let result = assignment_service(&app_state)
        .reject(identity, assignment_id, feedback)
        .await;

    respond(result, StatusCode::OK, "Assignment rejected successfully")
}
