use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::models::{
    assignment::{
        ActiveModel, AssignmentRecord, AssignmentStatus, Column, Entity, Model, normalize_admins,
    },
    assignment_admin,
};
use crate::repositories::repository::{AssignmentQuery, AssignmentStore, NewAssignment};

/// SeaORM-backed assignment store. Each write runs in a transaction so the
/// assignment row and its admin rows never disagree.
#[derive(Clone)]
pub struct AssignmentRepository {
    db: DatabaseConnection,
}

impl AssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn admins_for<C: ConnectionTrait>(
        conn: &C,
        assignment_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<i64>>, DbErr> {
        let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
        if assignment_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = assignment_admin::Entity::find()
            .filter(assignment_admin::Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .all(conn)
            .await?;

        for row in rows {
            grouped.entry(row.assignment_id).or_default().push(row.admin_id);
        }
        Ok(grouped)
    }

    async fn replace_admins<C: ConnectionTrait>(
        conn: &C,
        assignment_id: i64,
        admin_ids: &[i64],
    ) -> Result<(), DbErr> {
        assignment_admin::Entity::delete_many()
            .filter(assignment_admin::Column::AssignmentId.eq(assignment_id))
            .exec(conn)
            .await?;

        if admin_ids.is_empty() {
            return Ok(());
        }

        let rows = admin_ids.iter().map(|&admin_id| assignment_admin::ActiveModel {
            assignment_id: Set(assignment_id),
            admin_id: Set(admin_id),
        });
        assignment_admin::Entity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    async fn assemble(&self, models: Vec<Model>) -> Result<Vec<AssignmentRecord>, DbErr> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut admins = Self::admins_for(&self.db, &ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let set = admins.remove(&m.id).unwrap_or_default();
                AssignmentRecord::from_parts(m, set)
            })
            .collect())
    }
}

#[async_trait]
impl AssignmentStore for AssignmentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<AssignmentRecord>, DbErr> {
        let Some(model) = Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.assemble(vec![model]).await?.pop())
    }

    async fn find(&self, query: AssignmentQuery) -> Result<Vec<AssignmentRecord>, DbErr> {
        let select = match query {
            AssignmentQuery::CreatedBy(user_id) => Entity::find().filter(Column::UserId.eq(user_id)),
            AssignmentQuery::AssignedTo(admin_id) => {
                let ids: Vec<i64> = assignment_admin::Entity::find()
                    .select_only()
                    .column(assignment_admin::Column::AssignmentId)
                    .filter(assignment_admin::Column::AdminId.eq(admin_id))
                    .into_tuple()
                    .all(&self.db)
                    .await?;
                if ids.is_empty() {
                    return Ok(Vec::new());
                }
                Entity::find().filter(Column::Id.is_in(ids))
            }
        };

        let models = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;

        self.assemble(models).await
    }

    async fn insert(&self, new: NewAssignment) -> Result<AssignmentRecord, DbErr> {
        let mut admin_ids = new.assigned_admins;
        normalize_admins(&mut admin_ids);

        let now = Utc::now();
        let txn = self.db.begin().await?;

        let model = ActiveModel {
            user_id: Set(new.user_id),
            task: Set(new.task),
            status: Set(AssignmentStatus::Pending),
            feedback: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        Self::replace_admins(&txn, model.id, &admin_ids).await?;
        txn.commit().await?;

        tracing::debug!(assignment_id = model.id, admins = admin_ids.len(), "Inserted assignment");
        Ok(AssignmentRecord::from_parts(model, admin_ids))
    }

    async fn save(&self, record: AssignmentRecord) -> Result<AssignmentRecord, DbErr> {
        let mut admin_ids = record.assigned_admins;
        normalize_admins(&mut admin_ids);

        let txn = self.db.begin().await?;

        let existing = Entity::find_by_id(record.id).one(&txn).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("Assignment {} not found", record.id))
        })?;

        let mut active = existing.into_active_model();
        active.task = Set(record.task);
        active.status = Set(record.status);
        active.feedback = Set(record.feedback);
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;

        Self::replace_admins(&txn, model.id, &admin_ids).await?;
        txn.commit().await?;

        Ok(AssignmentRecord::from_parts(model, admin_ids))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        assignment_admin::Entity::delete_many()
            .filter(assignment_admin::Column::AssignmentId.eq(id))
            .exec(&txn)
            .await?;
        Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await
    }
}
