//! Store abstractions and their SeaORM implementations.
//!
//! Services depend on the [`UserDirectory`] and [`AssignmentStore`] traits only,
//! so tests can swap in the in-memory versions from [`crate::test_utils`].

pub mod assignment_repository;
pub mod repository;
pub mod user_repository;

pub use assignment_repository::AssignmentRepository;
pub use repository::{AssignmentQuery, AssignmentStore, NewAssignment, UserDirectory};
pub use user_repository::UserRepository;
