//! `/assignments` route group. Mounted behind `allow_authenticated`.
//!
//! Mutations are all `POST` with the action in the path, e.g. `/assignments/reject/{id}`.

pub mod common;
pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

use get::list_assignments;
use post::{
    accept_assignment, create_assignment, delete_assignment, reject_assignment, update_assignment,
};

pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assignments))
        .route("/create", post(create_assignment))
        .route("/update/{assignment_id}", post(update_assignment))
        .route("/delete/{assignment_id}", post(delete_assignment))
        .route("/accept/{assignment_id}", post(accept_assignment))
        .route("/reject/{assignment_id}", post(reject_assignment))
}
