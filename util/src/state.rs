//! Application state container shared across Axum route handlers and services.
//!
//! The state only carries the database handle; services are built per request
//! from it, so nothing mutable is shared between requests.

use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` around a SeaORM connection pool.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a cloned copy of the database connection.
    ///
    /// Useful when a repository needs to own its handle.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
