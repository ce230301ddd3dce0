use db::models::user;

/// The authenticated caller, tagged with its role.
///
/// Operations match on the variant instead of reading an `admin` flag, so a
/// role check cannot be skipped by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    Regular(i64),
    Admin(i64),
}

impl Identity {
    pub fn from_user(user: &user::Model) -> Self {
        if user.admin {
            Identity::Admin(user.id)
        } else {
            Identity::Regular(user.id)
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Identity::Regular(id) | Identity::Admin(id) => id,
        }
    }
}
