use std::collections::HashSet;

use async_trait::async_trait;
use db::repositories::{AssignmentQuery, AssignmentRepository, AssignmentStore, UserRepository};
use sea_orm::DatabaseConnection;
use services::{
    Identity, ServiceError,
    assignment_service::{AssignmentService, CreateAssignment, LifecyclePolicy},
    user_service::UserService,
};

use crate::seed::Seeder;

const TASKS: [(&str, &str, &[&str]); 4] = [
    ("alice", "Review the onboarding document", &["adminX"]),
    ("alice", "Approve the Q3 budget draft", &["adminX", "adminY"]),
    ("bob", "Check the release checklist", &["adminY"]),
    ("bob", "Sign off on the vendor contract", &["adminX"]),
];

/// Creators who already own assignments are left alone, so reruns add nothing.
pub struct AssignmentSeeder;

#[async_trait]
impl Seeder for AssignmentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), ServiceError> {
        let users = UserRepository::new(db.clone());
        let identities = UserService::new(users.clone());
        let service = AssignmentService::new(
            AssignmentRepository::new(db.clone()),
            users.clone(),
            LifecyclePolicy::Permissive,
        );

        let store = AssignmentRepository::new(db.clone());
        let mut already_seeded = HashSet::new();
        for (creator, _, _) in TASKS {
            if let Some(user) = users.find_by_username(creator).await? {
                if !store.find(AssignmentQuery::CreatedBy(user.id)).await?.is_empty() {
                    already_seeded.insert(creator);
                }
            }
        }

        for (creator, task, admins) in TASKS {
            if already_seeded.contains(creator) {
                continue;
            }
            let Some(user) = users.find_by_username(creator).await? else {
                return Err(ServiceError::NotFound(format!("Seed user {creator} is missing")));
            };
            let caller = identities.identify(user.id).await?;

            let view = service
                .create(
                    caller,
                    CreateAssignment {
                        task: task.to_string(),
                        assigned_admins: admins.iter().map(|a| a.to_string()).collect(),
                    },
                )
                .await?;

            // Decide a random subset so every status shows up.
            let Some(reviewer) = users.find_by_username(admins[0]).await? else {
                continue;
            };
            let reviewer = Identity::from_user(&reviewer);
            match fastrand::u8(..3) {
                0 => {
                    service
                        .accept(reviewer, view.id, Some("Looks good".into()))
                        .await?;
                }
                1 => {
                    service
                        .reject(reviewer, view.id, Some("Needs more detail".into()))
                        .await?;
                }
                _ => {}
            }
        }

        Ok(())
    }
}
