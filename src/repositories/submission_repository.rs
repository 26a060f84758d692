use crate::entities::sea_orm_active_enums::SubmissionStatus;
use crate::entities::submission;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

pub struct SubmissionRepository;

impl SubmissionRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// `Ok(None)` means no row has been materialized yet, i.e. the
    /// submission is Pending. Callers must not treat that as a failure.
    pub async fn find(
        &self,
        assignment_id: Uuid,
        mentee_id: Uuid,
    ) -> Result<Option<submission::Model>> {
        let db = self.get_connection();
        let found = submission::Entity::find_by_id((assignment_id, mentee_id))
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn find_by_assignment(&self, assignment_id: Uuid) -> Result<Vec<submission::Model>> {
        let db = self.get_connection();
        let found = submission::Entity::find()
            .filter(submission::Column::AssignmentId.eq(assignment_id))
            .all(db)
            .await?;
        Ok(found)
    }

    /// Idempotent upsert keyed by (assignment_id, mentee_id).
    pub async fn upsert(
        &self,
        assignment_id: Uuid,
        mentee_id: Uuid,
        status: SubmissionStatus,
        file_url: Option<String>,
    ) -> Result<submission::Model> {
        let db = self.get_connection();
        let model = submission::ActiveModel {
            assignment_id: Set(assignment_id),
            mentee_id: Set(mentee_id),
            file_url: Set(file_url),
            submitted_at: Set(chrono::Utc::now().naive_utc()),
            status: Set(status),
        };

        let result = submission::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    submission::Column::AssignmentId,
                    submission::Column::MenteeId,
                ])
                .update_columns([
                    submission::Column::FileUrl,
                    submission::Column::SubmittedAt,
                    submission::Column::Status,
                ])
                .to_owned(),
            )
            .exec_with_returning(db)
            .await?;
        Ok(result)
    }
}
