use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a row in the `assignments` table.
///
/// The admin set lives in `assignment_admins`; see [`AssignmentRecord`] for the
/// assembled aggregate the service layer works with.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Creator. Immutable after insert.
    pub user_id: i64,

    #[sea_orm(column_type = "Text")]
    pub task: String,

    pub status: AssignmentStatus,

    #[sea_orm(column_type = "Text")]
    pub feedback: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "assignment_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AssignmentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "accepted")]
    Accepted,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl AssignmentStatus {
    /// `accepted` and `rejected` are decisions; only `pending` awaits one.
    pub fn is_decided(self) -> bool {
        !matches!(self, AssignmentStatus::Pending)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Creator,

    #[sea_orm(has_many = "super::assignment_admin::Entity")]
    Admins,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::assignment_admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// An assignment row together with its admin set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub id: i64,
    pub user_id: i64,
    pub task: String,
    /// Sorted, duplicate-free admin ids.
    pub assigned_admins: Vec<i64>,
    pub status: AssignmentStatus,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssignmentRecord {
    pub fn from_parts(model: Model, mut assigned_admins: Vec<i64>) -> Self {
        normalize_admins(&mut assigned_admins);
        Self {
            id: model.id,
            user_id: model.user_id,
            task: model.task,
            assigned_admins,
            status: model.status,
            feedback: model.feedback,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    pub fn is_created_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    pub fn is_assigned_to(&self, admin_id: i64) -> bool {
        self.assigned_admins.binary_search(&admin_id).is_ok()
    }
}

/// Sorts and dedups an admin id list so it behaves like a set.
pub fn normalize_admins(ids: &mut Vec<i64>) {
    ids.sort_unstable();
    ids.dedup();
}
