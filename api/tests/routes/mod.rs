mod assignments_test;
mod auth_test;
mod health_test;
mod users_test;
