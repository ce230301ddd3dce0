pub mod m202510180001_create_users;
pub mod m202510180002_create_assignments;
pub mod m202510180003_create_assignment_admins;
