use std::collections::HashMap;

use chrono::{DateTime, Utc};
use db::models::{
    assignment::{AssignmentRecord, AssignmentStatus},
    user,
};
use db::repositories::{AssignmentQuery, AssignmentStore, NewAssignment, UserDirectory};

use crate::error::{ServiceError, ServiceResult};
use crate::identity::Identity;
use crate::user_service::UserSummary;

const INVALID_ADMINS: &str = "One or more admin usernames are invalid or users are not admins";
const NOT_FOUND: &str = "Assignment not found";
const NOT_FOUND_OR_UNAUTHORIZED: &str = "Assignment not found or you're not authorized";

/// Whether decided assignments may still change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePolicy {
    /// Accepted/rejected assignments can be decided again and edited by their creator.
    #[default]
    Permissive,
    /// `accepted` and `rejected` are terminal: no further decisions or edits.
    Strict,
}

impl LifecyclePolicy {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            LifecyclePolicy::Strict
        } else {
            LifecyclePolicy::Permissive
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAssignment {
    pub task: String,
    /// Admin usernames; every one must resolve to an admin.
    pub assigned_admins: Vec<String>,
}

/// Partial update. Absent or empty fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct UpdateAssignment {
    pub task: Option<String>,
    pub assigned_admins: Option<Vec<String>>,
}

/// An assignment with creator and admin ids resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentView {
    pub id: i64,
    pub creator: Option<UserSummary>,
    pub task: String,
    /// `None` when the admin set is hidden from the caller.
    pub assigned_admins: Option<Vec<UserSummary>>,
    pub status: AssignmentStatus,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct AssignmentService<S, U> {
    store: S,
    users: U,
    policy: LifecyclePolicy,
}

impl<S, U> AssignmentService<S, U>
where
    S: AssignmentStore,
    U: UserDirectory,
{
    pub fn new(store: S, users: U, policy: LifecyclePolicy) -> Self {
        Self {
            store,
            users,
            policy,
        }
    }

    /// Files a new assignment on behalf of a regular user.
    pub async fn create(
        &self,
        caller: Identity,
        params: CreateAssignment,
    ) -> ServiceResult<AssignmentView> {
        let creator_id = match caller {
            Identity::Admin(_) => {
                return Err(ServiceError::Forbidden(
                    "Admins cannot create assignments".into(),
                ));
            }
            Identity::Regular(id) => id,
        };

        if params.task.trim().is_empty() {
            return Err(ServiceError::InvalidInput("Task cannot be empty".into()));
        }
        let admin_ids = self.resolve_admins(&params.assigned_admins).await?;

        let record = self
            .store
            .insert(NewAssignment {
                user_id: creator_id,
                task: params.task,
                assigned_admins: admin_ids,
            })
            .await?;

        tracing::info!(
            assignment_id = record.id,
            creator_id,
            admins = record.assigned_admins.len(),
            "Assignment created"
        );
        self.present_one(record, true).await
    }

    /// Edits task and/or admin set. Only the creator may do this.
    pub async fn update(
        &self,
        caller: Identity,
        assignment_id: i64,
        params: UpdateAssignment,
    ) -> ServiceResult<AssignmentView> {
        let mut record = self.find_owned(caller, assignment_id, "update").await?;
        self.ensure_open(&record)?;

        let new_admins = match params.assigned_admins {
            Some(usernames) if !usernames.is_empty() => {
                Some(self.resolve_admins(&usernames).await?)
            }
            _ => None,
        };

        if let Some(task) = params.task.filter(|t| !t.is_empty()) {
            record.task = task;
        }
        if let Some(admin_ids) = new_admins {
            record.assigned_admins = admin_ids;
        }

        let saved = self.store.save(record).await?;
        tracing::info!(assignment_id, "Assignment updated");
        self.present_one(saved, true).await
    }

    /// Permanently removes an assignment. Only the creator may do this.
    pub async fn delete(&self, caller: Identity, assignment_id: i64) -> ServiceResult<()> {
        let record = self.find_owned(caller, assignment_id, "delete").await?;
        self.store.delete_by_id(record.id).await?;
        tracing::info!(assignment_id, user_id = caller.id(), "Assignment deleted");
        Ok(())
    }

    /// Admins see what they were asked to review (admin set hidden); regular
    /// users see what they filed. Newest first.
    pub async fn list(&self, caller: Identity) -> ServiceResult<Vec<AssignmentView>> {
        let (query, include_admins) = match caller {
            Identity::Admin(id) => (AssignmentQuery::AssignedTo(id), false),
            Identity::Regular(id) => (AssignmentQuery::CreatedBy(id), true),
        };

        let records = self.store.find(query).await?;
        self.present(records, include_admins).await
    }

    /// Marks an assignment accepted. A non-empty `feedback` replaces the stored one.
    pub async fn accept(
        &self,
        caller: Identity,
        assignment_id: i64,
        feedback: Option<String>,
    ) -> ServiceResult<AssignmentView> {
        let mut record = self.find_for_reviewer(caller, assignment_id).await?;
        self.ensure_open(&record)?;

        record.status = AssignmentStatus::Accepted;
        if let Some(feedback) = feedback.filter(|f| !f.is_empty()) {
            record.feedback = feedback;
        }

        let saved = self.store.save(record).await?;
        tracing::info!(assignment_id, admin_id = caller.id(), "Assignment accepted");
        self.present_one(saved, true).await
    }

    /// Marks an assignment rejected. Feedback is mandatory.
    pub async fn reject(
        &self,
        caller: Identity,
        assignment_id: i64,
        feedback: Option<String>,
    ) -> ServiceResult<AssignmentView> {
        let mut record = self.find_for_reviewer(caller, assignment_id).await?;

        let Some(feedback) = feedback.filter(|f| !f.is_empty()) else {
            return Err(ServiceError::InvalidInput(
                "Feedback is required when rejecting an assignment".into(),
            ));
        };
        self.ensure_open(&record)?;

        record.status = AssignmentStatus::Rejected;
        record.feedback = feedback;

        let saved = self.store.save(record).await?;
        tracing::info!(assignment_id, admin_id = caller.id(), "Assignment rejected");
        self.present_one(saved, true).await
    }

    /// Maps usernames to admin ids, all or nothing.
    async fn resolve_admins(&self, usernames: &[String]) -> ServiceResult<Vec<i64>> {
        if usernames.is_empty() {
            return Err(ServiceError::InvalidInput(
                "At least one admin must be assigned".into(),
            ));
        }

        let admins = self.users.find_admins_by_usernames(usernames).await?;
        // Duplicates in the input also land here, since the lookup returns each admin once.
        if admins.len() != usernames.len() {
            return Err(ServiceError::InvalidInput(INVALID_ADMINS.into()));
        }

        Ok(admins.into_iter().map(|a| a.id).collect())
    }

    async fn find_owned(
        &self,
        caller: Identity,
        assignment_id: i64,
        action: &str,
    ) -> ServiceResult<AssignmentRecord> {
        let record = self
            .store
            .find_by_id(assignment_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.into()))?;

        if !record.is_created_by(caller.id()) {
            return Err(ServiceError::Forbidden(format!(
                "You are not authorized to {action} this assignment"
            )));
        }
        Ok(record)
    }

    /// Existence and assignment are checked together so outsiders cannot probe ids.
    async fn find_for_reviewer(
        &self,
        caller: Identity,
        assignment_id: i64,
    ) -> ServiceResult<AssignmentRecord> {
        let not_found = || ServiceError::NotFound(NOT_FOUND_OR_UNAUTHORIZED.into());

        let Identity::Admin(admin_id) = caller else {
            return Err(not_found());
        };

        match self.store.find_by_id(assignment_id).await? {
            Some(record) if record.is_assigned_to(admin_id) => Ok(record),
            _ => Err(not_found()),
        }
    }

    fn ensure_open(&self, record: &AssignmentRecord) -> ServiceResult<()> {
        if self.policy == LifecyclePolicy::Strict && record.status.is_decided() {
            return Err(ServiceError::Conflict(format!(
                "Assignment has already been {}",
                record.status
            )));
        }
        Ok(())
    }

    async fn present_one(
        &self,
        record: AssignmentRecord,
        include_admins: bool,
    ) -> ServiceResult<AssignmentView> {
        let mut views = self.present(vec![record], include_admins).await?;
        views
            .pop()
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.into()))
    }

    async fn present(
        &self,
        records: Vec<AssignmentRecord>,
        include_admins: bool,
    ) -> ServiceResult<Vec<AssignmentView>> {
        let mut ids: Vec<i64> = records.iter().map(|r| r.user_id).collect();
        if include_admins {
            ids.extend(records.iter().flat_map(|r| r.assigned_admins.iter().copied()));
        }
        ids.sort_unstable();
        ids.dedup();

        let people: HashMap<i64, user::Model> = self
            .users
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let summary = |id: &i64| people.get(id).map(UserSummary::from);

        Ok(records
            .into_iter()
            .map(|r| AssignmentView {
                id: r.id,
                creator: summary(&r.user_id),
                task: r.task,
                assigned_admins: include_admins
                    .then(|| r.assigned_admins.iter().filter_map(summary).collect()),
                status: r.status,
                feedback: r.feedback,
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
            .collect())
    }
}
