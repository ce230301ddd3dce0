pub mod assignment;
pub mod assignment_admin;
pub mod user;
