//! Invitation code administration.

use crate::entities::invitation_code;
use crate::error::{ServiceResult, map_db_error};
use crate::repositories::InvitationCodeRepository;
use crate::service::DomainService;

impl DomainService {
    pub async fn get_invitation_codes(&self) -> ServiceResult<Vec<invitation_code::Model>> {
        let codes = InvitationCodeRepository::new().find_all().await?;
        Ok(codes)
    }

    pub async fn add_invitation_code(&self, code: &str) -> ServiceResult<invitation_code::Model> {
        let created = InvitationCodeRepository::new()
            .create(code.trim().to_string())
            .await
            .map_err(|e| map_db_error(e, "This invitation code already exists."))?;
        tracing::info!(code = %created.code, "invitation code created");
        Ok(created)
    }

    pub async fn toggle_invitation_code(
        &self,
        code: &str,
        is_active: bool,
    ) -> ServiceResult<invitation_code::Model> {
        let updated = InvitationCodeRepository::new()
            .set_active(code, is_active)
            .await?;
        Ok(updated)
    }
}
