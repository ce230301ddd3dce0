//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration and login (public)
//! - `/assignments` → Assignment creation, review and listing (authenticated)
//! - `/users` → Admin directory (authenticated)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    assignments::assignment_routes, auth::auth_routes, health::health_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod assignments;
pub mod auth;
pub mod common;
pub mod health;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// Protected groups run `allow_authenticated` as a route layer, so unmatched
/// paths still return `404` instead of `401`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/assignments",
            assignment_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/users",
            users_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
