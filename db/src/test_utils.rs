//! Test doubles shared by the workspace.
//!
//! `setup_test_db` gives a migrated in-memory SQLite database; the in-memory
//! store and directory implement the repository traits without any database at all.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tokio::sync::{Mutex, RwLock};

use crate::models::assignment::{AssignmentRecord, AssignmentStatus, normalize_admins};
use crate::models::user;
use crate::repositories::repository::{
    AssignmentQuery, AssignmentStore, NewAssignment, UserDirectory,
};

/// Connects to a fresh in-memory SQLite database and applies all migrations.
pub async fn setup_test_db() -> DatabaseConnection {
    // Every pooled connection would get its own in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// In-memory [`UserDirectory`]. Clones share the same user list.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<Vec<user::Model>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user with the next free id and returns it.
    pub async fn add_user(&self, username: &str, full_name: &str, admin: bool) -> user::Model {
        let mut users = self.users.write().await;
        let now = Utc::now();
        let model = user::Model {
            id: users.len() as i64 + 1,
            username: username.to_owned(),
            full_name: full_name.to_owned(),
            password_hash: String::new(),
            admin,
            created_at: now,
            updated_at: now,
        };
        users.push(model.clone());
        model
    }

    /// Flips the admin flag of an existing user, e.g. to model a demotion.
    pub async fn set_admin(&self, id: i64, admin: bool) {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.admin = admin;
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, DbErr> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<user::Model>, DbErr> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_admins_by_usernames(
        &self,
        usernames: &[String],
    ) -> Result<Vec<user::Model>, DbErr> {
        // Reverse order so callers cannot rely on input order.
        Ok(self
            .users
            .read()
            .await
            .iter()
            .rev()
            .filter(|u| u.admin && usernames.contains(&u.username))
            .cloned()
            .collect())
    }

    async fn list_admins(&self) -> Result<Vec<user::Model>, DbErr> {
        let mut admins: Vec<user::Model> = self
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.admin)
            .cloned()
            .collect();
        admins.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(admins)
    }
}

#[derive(Default)]
struct AssignmentTable {
    next_id: i64,
    rows: BTreeMap<i64, AssignmentRecord>,
    unavailable: bool,
}

impl AssignmentTable {
    fn check(&self) -> Result<(), DbErr> {
        if self.unavailable {
            return Err(DbErr::Custom("assignment store unavailable".into()));
        }
        Ok(())
    }
}

/// In-memory [`AssignmentStore`]. Clones share the same table.
#[derive(Clone, Default)]
pub struct InMemoryAssignmentStore {
    table: Arc<Mutex<AssignmentTable>>,
}

impl InMemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a `DbErr`, to exercise internal-error paths.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.table.lock().await.unavailable = unavailable;
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AssignmentStore for InMemoryAssignmentStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<AssignmentRecord>, DbErr> {
        let table = self.table.lock().await;
        table.check()?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find(&self, query: AssignmentQuery) -> Result<Vec<AssignmentRecord>, DbErr> {
        let table = self.table.lock().await;
        table.check()?;

        let mut found: Vec<AssignmentRecord> = table
            .rows
            .values()
            .filter(|r| match query {
                AssignmentQuery::CreatedBy(user_id) => r.is_created_by(user_id),
                AssignmentQuery::AssignedTo(admin_id) => r.is_assigned_to(admin_id),
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn insert(&self, new: NewAssignment) -> Result<AssignmentRecord, DbErr> {
        let mut table = self.table.lock().await;
        table.check()?;

        table.next_id += 1;
        let mut assigned_admins = new.assigned_admins;
        normalize_admins(&mut assigned_admins);
        let now = Utc::now();
        let record = AssignmentRecord {
            id: table.next_id,
            user_id: new.user_id,
            task: new.task,
            assigned_admins,
            status: AssignmentStatus::Pending,
            feedback: String::new(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn save(&self, mut record: AssignmentRecord) -> Result<AssignmentRecord, DbErr> {
        let mut table = self.table.lock().await;
        table.check()?;

        let Some(existing) = table.rows.get_mut(&record.id) else {
            return Err(DbErr::RecordNotFound(format!(
                "Assignment {} not found",
                record.id
            )));
        };

        normalize_admins(&mut record.assigned_admins);
        existing.task = record.task;
        existing.assigned_admins = record.assigned_admins;
        existing.status = record.status;
        existing.feedback = record.feedback;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbErr> {
        let mut table = self.table.lock().await;
        table.check()?;
        table.rows.remove(&id);
        Ok(())
    }
}
