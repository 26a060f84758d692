//! Mentee lifecycle: creation (a privileged two-identity flow), edits,
//! removal and the role-scoped listing queries.

use serde_json::Value;
use uuid::Uuid;

use crate::config::MIN_PASSWORD_LEN;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{ServiceError, ServiceResult, map_db_error};
use crate::media::BUCKET_AVATARS;
use crate::repositories::{
    MenteeDataUpdate, MenteeRepository, NewMenteeData, ProfileRepository, ProfileUpdate,
};
use crate::resolver::{self, AppUser, DEFAULT_PHOTO_URL, MenteeUser, MentorUser};
use crate::service::DomainService;

pub struct NewMentee {
    pub name: String,
    pub username: String,
    pub password: String,
    pub adno: String,
    pub class: String,
    /// Pre-existing avatar URL, used when no file is uploaded.
    pub photo: Option<String>,
    pub photo_file: Option<Vec<u8>>,
    pub is_coordinator: bool,
    pub personal_details: Option<Value>,
    pub academic_details: Option<Value>,
    pub mentorship_details: Option<Value>,
}

#[derive(Default)]
pub struct MenteeUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub adno: Option<String>,
    pub class: Option<String>,
    pub photo_url: Option<String>,
    pub photo_file: Option<Vec<u8>>,
    pub is_coordinator: Option<bool>,
    pub personal_details: Option<Value>,
    pub academic_details: Option<Value>,
    pub mentorship_details: Option<Value>,
}

/// An update on an incomplete mentee (no extension row yet) is the
/// caller's error, not an internal one; a failure after the profile
/// half already landed is a partial write either way.
fn map_mentee_write_error(err: anyhow::Error, profile_written: bool) -> ServiceError {
    if err.to_string().contains("Mentee data not found") {
        return ServiceError::not_found("Mentee data not found");
    }
    if profile_written {
        ServiceError::PartialFailure(format!(
            "profile updated but mentee data write failed: {err}"
        ))
    } else {
        err.into()
    }
}

fn validate_new_mentee(data: &NewMentee) -> ServiceResult<()> {
    for (value, message) in [
        (&data.name, "Name is required."),
        (&data.username, "Username is required."),
        (&data.adno, "Admission number is required."),
        (&data.class, "Class is required."),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::validation(message));
        }
    }
    if data.password.len() < MIN_PASSWORD_LEN {
        return Err(ServiceError::validation(format!(
            "Password is too short (minimum {MIN_PASSWORD_LEN} characters)."
        )));
    }
    Ok(())
}

impl DomainService {
    /// Creates a mentee on behalf of the currently signed-in mentor or
    /// admin. Identity creation activates a session as the new mentee,
    /// so the caller's session is snapshotted before and restored after,
    /// under the adapter's switch lock so concurrent callers cannot
    /// interleave their displacement windows.
    ///
    /// The restore is non-negotiable: if it fails, whatever session is
    /// active cannot be trusted and the adapter is signed out before the
    /// error surfaces.
    pub async fn add_mentee(&self, mentor_id: Uuid, data: NewMentee) -> ServiceResult<MenteeUser> {
        let _guard = self.identity().lock_switches().await;

        let snapshot = self.identity().current_session().ok_or_else(|| {
            ServiceError::validation(
                "Authentication error: You must be logged in to add a mentee.",
            )
        })?;

        validate_new_mentee(&data)?;

        // Not `?` yet: the snapshot must be restored whether or not the
        // sign-up landed.
        let signup_result = self
            .identity()
            .sign_up(&data.username, &data.password, RoleEnum::Mentee)
            .await;

        if let Err(restore_err) = self.identity().set_session(snapshot) {
            tracing::error!(error = %restore_err, "session restore failed after mentee sign-up");
            self.identity().sign_out();
            return Err(ServiceError::SessionIntegrity);
        }

        let created = signup_result?;

        let profiles = ProfileRepository::new();
        profiles
            .update(
                created.id,
                ProfileUpdate {
                    name: Some(data.name.clone()),
                    ..Default::default()
                },
            )
            .await?;

        let photo_url = match &data.photo_file {
            Some(bytes) => Some(self.media.upload(BUCKET_AVATARS, created.id, bytes).await?),
            None => data.photo.clone(),
        };

        let row = MenteeRepository::new()
            .create(NewMenteeData {
                profile_id: created.id,
                mentor_id,
                adno: data.adno,
                class: data.class,
                photo_url: photo_url.or_else(|| Some(DEFAULT_PHOTO_URL.to_string())),
                is_coordinator: data.is_coordinator,
                personal_details: data.personal_details,
                academic_details: data.academic_details,
                mentorship_details: data.mentorship_details,
            })
            .await
            .map_err(|e| {
                ServiceError::PartialFailure(format!(
                    "mentee identity {} created but extension row failed: {e}",
                    created.id
                ))
            })?;

        let profile = profiles
            .find_by_id(created.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Profile not found"))?;
        let mentor = profiles
            .find_by_id(mentor_id)
            .await?
            .map(|p| resolver::mentor_ref(&p));

        match resolver::shape_user(&profile, Some(&row), mentor) {
            AppUser::Mentee(mentee) => Ok(mentee),
            _ => Err(ServiceError::Internal(anyhow::anyhow!(
                "created profile did not shape as a mentee"
            ))),
        }
    }

    /// Two independent writes: the profile row, then the extension row.
    /// A failure between them leaves the profile edit in place; the
    /// error names which half landed so the caller can retry the rest.
    pub async fn update_mentee(
        &self,
        mentee_id: Uuid,
        updates: MenteeUpdate,
    ) -> ServiceResult<MenteeUser> {
        let profiles = ProfileRepository::new();
        let mentees = MenteeRepository::new();

        let wants_profile_write =
            updates.name.is_some() || updates.username.is_some();
        if wants_profile_write {
            profiles
                .update(
                    mentee_id,
                    ProfileUpdate {
                        name: updates.name,
                        username: updates.username,
                        ..Default::default()
                    },
                )
                .await
                .map_err(|e| map_db_error(e, "This username is already taken."))?;
        }

        let photo_url = match updates.photo_file {
            Some(bytes) => Some(
                self.media
                    .upload(BUCKET_AVATARS, mentee_id, &bytes)
                    .await?,
            ),
            None => updates.photo_url,
        };

        mentees
            .update(
                mentee_id,
                MenteeDataUpdate {
                    adno: updates.adno,
                    class: updates.class,
                    photo_url,
                    is_coordinator: updates.is_coordinator,
                    personal_details: updates.personal_details,
                    academic_details: updates.academic_details,
                    mentorship_details: updates.mentorship_details,
                },
            )
            .await
            .map_err(|e| map_mentee_write_error(e, wants_profile_write))?;

        match resolver::resolve_user_by_id(mentee_id).await? {
            Some(AppUser::Mentee(mentee)) => Ok(mentee),
            _ => Err(ServiceError::not_found("Mentee not found")),
        }
    }

    pub async fn remove_mentee(&self, mentee_id: Uuid) -> ServiceResult<()> {
        ProfileRepository::new()
            .delete_user_cascade(mentee_id)
            .await?;
        Ok(())
    }

    pub async fn remove_mentor(&self, mentor_id: Uuid) -> ServiceResult<()> {
        ProfileRepository::new()
            .delete_user_cascade(mentor_id)
            .await?;
        Ok(())
    }

    pub async fn get_mentees_by_mentor(&self, mentor_id: Uuid) -> ServiceResult<Vec<MenteeUser>> {
        let profiles = ProfileRepository::new();
        let mentor = profiles
            .find_by_id(mentor_id)
            .await?
            .map(|p| resolver::mentor_ref(&p));

        let mut shaped = Vec::new();
        for row in MenteeRepository::new().find_by_mentor_id(mentor_id).await? {
            let Some(profile) = profiles.find_by_id(row.profile_id).await? else {
                // Orphaned extension row, skip rather than fail the list.
                tracing::warn!(mentee_id = %row.profile_id, "mentee data without profile");
                continue;
            };
            if let AppUser::Mentee(m) = resolver::shape_user(&profile, Some(&row), mentor.clone()) {
                shaped.push(m);
            }
        }
        Ok(shaped)
    }

    /// All mentors, each with their mentee id list populated.
    pub async fn get_all_mentors(&self) -> ServiceResult<Vec<MentorUser>> {
        let mentors = ProfileRepository::new()
            .find_all_by_role(RoleEnum::Mentor)
            .await?;
        let mentee_rows = MenteeRepository::new().find_all().await?;

        let shaped = mentors
            .iter()
            .filter_map(|p| {
                let mentees: Vec<Uuid> = mentee_rows
                    .iter()
                    .filter(|r| r.mentor_id == p.id)
                    .map(|r| r.profile_id)
                    .collect();
                match resolver::shape_user(p, None, None) {
                    AppUser::Mentor(mut m) => {
                        m.mentees = mentees;
                        Some(m)
                    }
                    _ => None,
                }
            })
            .collect();
        Ok(shaped)
    }

    pub async fn get_all_mentees(&self) -> ServiceResult<Vec<MenteeUser>> {
        let profiles = ProfileRepository::new();
        let mentor_profiles = profiles.find_all_by_role(RoleEnum::Mentor).await?;

        let mut shaped = Vec::new();
        for row in MenteeRepository::new().find_all().await? {
            let Some(profile) = profiles.find_by_id(row.profile_id).await? else {
                tracing::warn!(mentee_id = %row.profile_id, "mentee data without profile");
                continue;
            };
            let mentor = mentor_profiles
                .iter()
                .find(|m| m.id == row.mentor_id)
                .map(resolver::mentor_ref);
            if let AppUser::Mentee(m) = resolver::shape_user(&profile, Some(&row), mentor) {
                shaped.push(m);
            }
        }
        Ok(shaped)
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> ServiceResult<Option<AppUser>> {
        resolver::resolve_user_by_id(user_id).await
    }

    pub async fn get_mentee_by_id(&self, mentee_id: Uuid) -> ServiceResult<MenteeUser> {
        match resolver::resolve_user_by_id(mentee_id).await? {
            Some(AppUser::Mentee(mentee)) => Ok(mentee),
            Some(_) => Err(ServiceError::validation("User is not a mentee.")),
            None => Err(ServiceError::not_found("Mentee not found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_mentee() -> NewMentee {
        NewMentee {
            name: "Ravi Kumar".to_string(),
            username: "ravi.k".to_string(),
            password: "secret1".to_string(),
            adno: "1042".to_string(),
            class: "10B".to_string(),
            photo: None,
            photo_file: None,
            is_coordinator: false,
            personal_details: None,
            academic_details: None,
            mentorship_details: None,
        }
    }

    #[test]
    fn accepts_complete_mentee() {
        assert!(validate_new_mentee(&base_mentee()).is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let mut data = base_mentee();
        data.name = "  ".to_string();
        let err = validate_new_mentee(&data).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "Name is required."));
    }

    #[test]
    fn missing_extension_row_maps_to_not_found() {
        let err = anyhow::anyhow!("Mentee data not found");
        assert!(matches!(
            map_mentee_write_error(err, false),
            ServiceError::NotFound(msg) if msg == "Mentee data not found"
        ));
        // Even after a profile write, a missing row is still NotFound.
        let err = anyhow::anyhow!("Mentee data not found");
        assert!(matches!(
            map_mentee_write_error(err, true),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn other_failures_after_profile_write_are_partial() {
        let err = anyhow::anyhow!("connection reset by peer");
        assert!(matches!(
            map_mentee_write_error(err, true),
            ServiceError::PartialFailure(_)
        ));
        let err = anyhow::anyhow!("connection reset by peer");
        assert!(matches!(
            map_mentee_write_error(err, false),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn rejects_short_password() {
        let mut data = base_mentee();
        data.password = "abc".to_string();
        assert!(matches!(
            validate_new_mentee(&data),
            Err(ServiceError::Validation(_))
        ));
    }
}
