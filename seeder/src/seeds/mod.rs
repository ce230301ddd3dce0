pub mod assignment;
pub mod user;
