use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use db::models::user::Model;
use db::repositories::UserRepository;
use sea_orm::{DbErr, SqlErr};

use crate::error::{ServiceError, ServiceResult};

const DUPLICATE_USERNAME: &str = "A user with this username already exists";

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub admin: bool,
}

/// Account creation and password checks.
#[derive(Clone)]
pub struct AuthService {
    repo: UserRepository,
}

impl AuthService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn register(&self, params: RegisterUser) -> ServiceResult<Model> {
        let username = params.username.trim();
        if username.is_empty() {
            return Err(ServiceError::InvalidInput("Username cannot be empty".into()));
        }
        if params.full_name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("Full name cannot be empty".into()));
        }
        if params.password.is_empty() {
            return Err(ServiceError::InvalidInput("Password cannot be empty".into()));
        }

        if self.repo.find_by_username(username).await?.is_some() {
            return Err(ServiceError::Conflict(DUPLICATE_USERNAME.into()));
        }

        let hash = Self::hash_password(&params.password)?;
        let user = self
            .repo
            .create(username, params.full_name.trim(), &hash, params.admin)
            .await
            .map_err(|err| match err.sql_err() {
                // Lost a race with a concurrent registration.
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ServiceError::Conflict(DUPLICATE_USERNAME.into())
                }
                _ => ServiceError::from(err),
            })?;

        tracing::info!(user_id = user.id, admin = user.admin, "User registered");
        Ok(user)
    }

    /// Returns the user when the password matches, `None` otherwise.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> ServiceResult<Option<Model>> {
        let Some(user) = self.repo.find_by_username(username.trim()).await? else {
            return Ok(None);
        };

        Ok(Self::verify_password(&user, password).then_some(user))
    }

    pub fn hash_password(password: &str) -> ServiceResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ServiceError::Internal(DbErr::Custom(format!("password hashing failed: {e}"))))
    }

    pub fn verify_password(user: &Model, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&user.password_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
