use async_trait::async_trait;
use sea_orm::DbErr;

use crate::models::{assignment::AssignmentRecord, user};

/// Read-only view of the user table needed by the assignment core.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, DbErr>;

    /// Loads the given users in no particular order; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<user::Model>, DbErr>;

    /// Returns the admins among `usernames`. Unknown and non-admin names are
    /// silently dropped and the result order is unspecified, so callers
    /// reconcile by count.
    async fn find_admins_by_usernames(&self, usernames: &[String])
    -> Result<Vec<user::Model>, DbErr>;

    /// Every admin, ordered by username.
    async fn list_admins(&self) -> Result<Vec<user::Model>, DbErr>;
}

/// Which slice of assignments a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentQuery {
    CreatedBy(i64),
    AssignedTo(i64),
}

/// Input for [`AssignmentStore::insert`]. Status and feedback take their initial values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    pub user_id: i64,
    pub task: String,
    pub assigned_admins: Vec<i64>,
}

/// Persistence for assignments and their admin sets.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<AssignmentRecord>, DbErr>;

    /// Newest first; equal timestamps fall back to descending id.
    async fn find(&self, query: AssignmentQuery) -> Result<Vec<AssignmentRecord>, DbErr>;

    async fn insert(&self, new: NewAssignment) -> Result<AssignmentRecord, DbErr>;

    /// Persists `task`, `status`, `feedback` and the admin set of an existing
    /// record and refreshes `updated_at`. Fails with `RecordNotFound` if the
    /// row is gone.
    async fn save(&self, record: AssignmentRecord) -> Result<AssignmentRecord, DbErr>;

    async fn delete_by_id(&self, id: i64) -> Result<(), DbErr>;
}
