//! Business rules for assignments and users.
//!
//! Services are generic over the store traits in `db::repositories`, so the
//! same code runs against SeaORM in production and the in-memory doubles in tests.

pub mod assignment_service;
pub mod auth_service;
pub mod error;
pub mod identity;
pub mod user_service;

pub use error::ServiceError;
pub use identity::Identity;
