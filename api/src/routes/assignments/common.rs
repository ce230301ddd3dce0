use chrono::{DateTime, Utc};
use db::models::assignment::AssignmentStatus;
use db::repositories::{AssignmentRepository, UserRepository};
use serde::Serialize;
use services::{
    assignment_service::{AssignmentService, AssignmentView, LifecyclePolicy},
    user_service::UserSummary,
};
use util::{config, state::AppState};

/// Builds the assignment service over the SeaORM repositories, honouring the
/// configured lifecycle policy.
pub fn assignment_service(
    app_state: &AppState,
) -> AssignmentService<AssignmentRepository, UserRepository> {
    AssignmentService::new(
        AssignmentRepository::new(app_state.db_clone()),
        UserRepository::new(app_state.db_clone()),
        LifecyclePolicy::from_strict_flag(config::strict_assignment_lifecycle()),
    )
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: i64,
    /// `null` if the creator no longer exists.
    pub user: Option<UserResponse>,
    pub task: String,
    /// Omitted from an admin's review queue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_admins: Option<Vec<UserResponse>>,
    pub status: AssignmentStatus,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AssignmentView> for AssignmentResponse {
    fn from(view: AssignmentView) -> Self {
        Self {
            id: view.id,
            user: view.creator.map(UserResponse::from),
            task: view.task,
            assigned_admins: view
                .assigned_admins
                .map(|admins| admins.into_iter().map(UserResponse::from).collect()),
            status: view.status,
            feedback: view.feedback,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}
