use async_trait::async_trait;
use db::repositories::UserRepository;
use fake::{Fake, faker::name::en::Name};
use sea_orm::DatabaseConnection;
use services::{
    ServiceError,
    auth_service::{AuthService, RegisterUser},
};

use crate::seed::Seeder;

pub const SEED_PASSWORD: &str = "password123";

/// Fixed accounts that the other seeders and manual testing rely on.
pub const FIXED_USERS: [(&str, &str, bool); 4] = [
    ("adminX", "Xavier Admin", true),
    ("adminY", "Yara Admin", true),
    ("alice", "Alice Anders", false),
    ("bob", "Bob Brown", false),
];

pub struct UserSeeder;

async fn register(auth: &AuthService, username: String, full_name: String, admin: bool) -> Result<(), ServiceError> {
    match auth
        .register(RegisterUser {
            username,
            full_name,
            password: SEED_PASSWORD.to_string(),
            admin,
        })
        .await
    {
        // Already seeded.
        Ok(_) | Err(ServiceError::Conflict(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        let auth = AuthService::new(UserRepository::new(db.clone()));

        for (username, full_name, admin) in FIXED_USERS {
            register(&auth, username.to_string(), full_name.to_string(), admin).await?;
        }

        for _ in 0..10 {
            let username = format!("user{:05}", fastrand::u32(..100_000));
            let full_name: String = Name().fake();
            register(&auth, username, full_name, false).await?;
        }

        Ok(())
    }
}
