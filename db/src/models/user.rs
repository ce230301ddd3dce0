use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Represents a user in the `users` table.
///
/// Rows are written by the auth subsystem and the seeder; the assignment core
/// only reads them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login name.
    #[sea_orm(unique)]
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Argon2 PHC string. Never leaves the service layer.
    pub password_hash: String,
    /// Whether the user reviews assignments.
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
