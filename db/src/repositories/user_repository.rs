use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::models::user::{ActiveModel, Column, Entity, Model};
use crate::repositories::repository::UserDirectory;

/// SeaORM-backed access to the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a user. `password_hash` must already be hashed.
    pub async fn create(
        &self,
        username: &str,
        full_name: &str,
        password_hash: &str,
        admin: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            username: Set(username.to_owned()),
            full_name: Set(full_name.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            admin: Set(admin),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(&self.db).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(&self.db).await
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Entity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
    }

    async fn find_admins_by_usernames(&self, usernames: &[String]) -> Result<Vec<Model>, DbErr> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        Entity::find()
            .filter(Column::Username.is_in(usernames.iter().cloned()))
            .filter(Column::Admin.eq(true))
            .all(&self.db)
            .await
    }

    async fn list_admins(&self) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Admin.eq(true))
            .order_by_asc(Column::Username)
            .all(&self.db)
            .await
    }
}
