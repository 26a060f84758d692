//! User feedback: anyone submits, admins review and action.

use uuid::Uuid;

use crate::entities::feedback;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{ServiceError, ServiceResult};
use crate::repositories::FeedbackRepository;
use crate::service::DomainService;

impl DomainService {
    pub async fn submit_feedback(
        &self,
        user_id: Uuid,
        user_role: RoleEnum,
        user_name: String,
        content: String,
    ) -> ServiceResult<feedback::Model> {
        if content.trim().is_empty() {
            return Err(ServiceError::validation("Feedback cannot be empty."));
        }
        let created = FeedbackRepository::new()
            .create(user_id, user_role, user_name, content)
            .await?;
        Ok(created)
    }

    pub async fn get_feedback(&self) -> ServiceResult<Vec<feedback::Model>> {
        let found = FeedbackRepository::new().find_all().await?;
        Ok(found)
    }

    pub async fn set_feedback_actioned(
        &self,
        feedback_id: Uuid,
        is_actioned: bool,
    ) -> ServiceResult<feedback::Model> {
        let updated = FeedbackRepository::new()
            .set_actioned(feedback_id, is_actioned)
            .await?;
        Ok(updated)
    }
}
