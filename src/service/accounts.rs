//! Sign-in/out, registration and account maintenance.

use uuid::Uuid;

use crate::config::{APP_CONFIG, MIN_PASSWORD_LEN};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{ServiceError, ServiceResult, map_db_error};
use crate::media::BUCKET_MENTOR_AVATARS;
use crate::repositories::{InvitationCodeRepository, ProfileRepository, ProfileUpdate};
use crate::resolver::{self, AdminUser, AppUser, MentorUser};
use crate::service::DomainService;

fn require(value: &str, message: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(message));
    }
    Ok(())
}

fn require_password(password: &str) -> ServiceResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ServiceError::validation(format!(
            "Password is too short (minimum {MIN_PASSWORD_LEN} characters)."
        )));
    }
    Ok(())
}

impl DomainService {
    pub async fn sign_in(&self, username: &str, password: &str) -> ServiceResult<AppUser> {
        let _switch = self.identity().lock_switches().await;
        let profile = self.identity().sign_in(username, password).await?;
        resolver::resolve_user_by_id(profile.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile not found"))
    }

    pub fn sign_out(&self) {
        self.identity().sign_out();
    }

    pub async fn current_user(&self) -> ServiceResult<Option<AppUser>> {
        resolver::resolve_current_user(self.identity()).await
    }

    /// Mentor self-registration, gated by an invitation code that must
    /// both exist and still be active. The two failures are distinct on
    /// purpose: an unknown code is the user's typo, a deactivated one
    /// is an administrator's decision.
    pub async fn register_mentor(
        &self,
        username: &str,
        password: &str,
        name: &str,
        code: &str,
    ) -> ServiceResult<MentorUser> {
        // sign_up displaces the active session, so registration is a
        // session-switching operation like add_mentee and must not
        // interleave with one.
        let _switch = self.identity().lock_switches().await;

        require(username, "Username is required.")?;
        require(name, "Name is required.")?;
        require_password(password)?;

        let inv_code = InvitationCodeRepository::new()
            .find_by_code(code)
            .await?
            .ok_or_else(|| {
                ServiceError::validation(
                    "Invalid invitation code. Please check the code and try again.",
                )
            })?;
        if !inv_code.is_active {
            return Err(ServiceError::InactiveCode);
        }

        let created = self
            .identity()
            .sign_up(username, password, RoleEnum::Mentor)
            .await?;

        // The identity step creates a nameless profile; fill it in.
        let updated = ProfileRepository::new()
            .update(
                created.id,
                ProfileUpdate {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
            )
            .await?;

        match resolver::shape_user(&updated, None, None) {
            AppUser::Mentor(mentor) => Ok(mentor),
            _ => Err(ServiceError::Internal(anyhow::anyhow!(
                "registered profile did not shape as a mentor"
            ))),
        }
    }

    /// First-admin setup, gated by the deployment's setup secret.
    pub async fn register_admin(
        &self,
        username: &str,
        password: &str,
        name: &str,
        setup_code: &str,
    ) -> ServiceResult<AdminUser> {
        let _switch = self.identity().lock_switches().await;

        if setup_code != APP_CONFIG.admin_setup_code {
            return Err(ServiceError::validation("Invalid Admin Secret Code."));
        }
        require(username, "Username is required.")?;
        require(name, "Name is required.")?;
        require_password(password)?;

        let created = self
            .identity()
            .sign_up(username, password, RoleEnum::Admin)
            .await?;

        let updated = ProfileRepository::new()
            .update(
                created.id,
                ProfileUpdate {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
            )
            .await?;

        match resolver::shape_user(&updated, None, None) {
            AppUser::Admin(admin) => Ok(admin),
            _ => Err(ServiceError::Internal(anyhow::anyhow!(
                "registered profile did not shape as an admin"
            ))),
        }
    }

    pub async fn update_mentor_profile(
        &self,
        mentor_id: Uuid,
        name: Option<String>,
        username: Option<String>,
        photo_file: Option<Vec<u8>>,
    ) -> ServiceResult<MentorUser> {
        let photo_url = match photo_file {
            Some(bytes) => Some(
                self.media
                    .upload(BUCKET_MENTOR_AVATARS, mentor_id, &bytes)
                    .await?,
            ),
            None => None,
        };

        let updated = ProfileRepository::new()
            .update(
                mentor_id,
                ProfileUpdate {
                    name,
                    username,
                    photo_url,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| map_db_error(e, "This username is already taken."))?;

        match resolver::shape_user(&updated, None, None) {
            AppUser::Mentor(mentor) => Ok(mentor),
            _ => Err(ServiceError::not_found("Mentor not found")),
        }
    }

    pub async fn update_admin_profile(
        &self,
        admin_id: Uuid,
        name: Option<String>,
        username: Option<String>,
    ) -> ServiceResult<AdminUser> {
        let updated = ProfileRepository::new()
            .update(
                admin_id,
                ProfileUpdate {
                    name,
                    username,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| map_db_error(e, "This username is already taken."))?;

        match resolver::shape_user(&updated, None, None) {
            AppUser::Admin(admin) => Ok(admin),
            _ => Err(ServiceError::not_found("Admin not found")),
        }
    }

    /// Changes the password of the active session's owner.
    pub async fn update_own_password(&self, new_password: &str) -> ServiceResult<()> {
        require_password(new_password)?;
        self.identity().update_password(new_password).await
    }

    /// Admin-side reset for any user, no session involvement.
    pub async fn admin_reset_user_password(
        &self,
        user_id: Uuid,
        new_password: &str,
    ) -> ServiceResult<()> {
        require_password(new_password)?;
        self.identity()
            .admin_reset_password(user_id, new_password)
            .await
    }
}
