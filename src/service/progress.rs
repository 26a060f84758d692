//! Narrative progress records kept by mentors per mentee.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::entities::progress_record;
use crate::error::{ServiceError, ServiceResult};
use crate::repositories::{ProgressRepository, ProgressUpdate};
use crate::service::DomainService;

pub struct NewProgressRecord {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub meeting_date: NaiveDate,
    pub key_topics_discussed: String,
    pub mentee_action_items: String,
    pub mentor_action_items: String,
    pub milestones_wins: String,
    pub key_insights: String,
}

impl DomainService {
    pub async fn add_progress_record(
        &self,
        record: NewProgressRecord,
    ) -> ServiceResult<progress_record::Model> {
        if record.key_topics_discussed.trim().is_empty() {
            return Err(ServiceError::validation("Key topics are required."));
        }
        let created = ProgressRepository::new()
            .create(
                record.mentor_id,
                record.mentee_id,
                record.meeting_date,
                record.key_topics_discussed,
                record.mentee_action_items,
                record.mentor_action_items,
                record.milestones_wins,
                record.key_insights,
            )
            .await?;
        Ok(created)
    }

    pub async fn get_progress_records(
        &self,
        mentee_id: Uuid,
    ) -> ServiceResult<Vec<progress_record::Model>> {
        let found = ProgressRepository::new().find_by_mentee(mentee_id).await?;
        Ok(found)
    }

    pub async fn update_progress_record(
        &self,
        record_id: Uuid,
        updates: ProgressUpdate,
    ) -> ServiceResult<progress_record::Model> {
        let updated = ProgressRepository::new().update(record_id, updates).await?;
        Ok(updated)
    }

    pub async fn delete_progress_record(&self, record_id: Uuid) -> ServiceResult<()> {
        ProgressRepository::new().delete(record_id).await?;
        Ok(())
    }
}
