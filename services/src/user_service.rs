use db::models::user;
use db::repositories::UserDirectory;

use crate::error::{ServiceError, ServiceResult};
use crate::identity::Identity;

/// Public projection of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub full_name: String,
}

impl From<&user::Model> for UserSummary {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

pub struct UserService<U> {
    users: U,
}

impl<U: UserDirectory> UserService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Resolves an authenticated user id to an [`Identity`] using the stored
    /// admin flag, so promotions and demotions apply immediately.
    pub async fn identify(&self, user_id: i64) -> ServiceResult<Identity> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|u| Identity::from_user(&u))
            .ok_or_else(|| ServiceError::Unauthorized("User no longer exists".into()))
    }

    /// All admins ordered by username, for picking reviewers.
    pub async fn list_admins(&self) -> ServiceResult<Vec<UserSummary>> {
        let admins = self.users.list_admins().await?;
        Ok(admins.iter().map(UserSummary::from).collect())
    }
}
