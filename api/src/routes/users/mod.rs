//! `/users` route group. Mounted behind `allow_authenticated`.

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use get::list_admins;

/// - `GET /users/admin` → `list_admins`
pub fn users_routes() -> Router<AppState> {
    Router::new().route("/admin", get(list_admins))
}
