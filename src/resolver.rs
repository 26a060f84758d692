//! Profile resolver: turns raw identity/profile rows into fully shaped
//! role variants.
//!
//! A MENTEE profile whose extension row has not been created yet (the
//! window between identity creation and the mentees_data insert, or a
//! failed `add_mentee`) is shaped as a scaffolded default Mentee, never
//! an error.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{mentee_data, profile};
use crate::error::ServiceResult;
use crate::identity::IdentityAdapter;
use crate::repositories::{MenteeRepository, ProfileRepository};

/// Placeholder shown until a real photo is uploaded.
pub const DEFAULT_PHOTO_URL: &str = "https://picsum.photos/200";

/// Read-only snapshot of a mentee's owning mentor, embedded at shaping
/// time. Not a live link: later mentor edits do not propagate into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentorRef {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub role: RoleEnum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentorUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    /// Lazy: empty unless the caller queried the mentee list separately.
    pub mentees: Vec<Uuid>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenteeUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    /// `None` while the mentee is incomplete (no extension row yet).
    pub mentor_id: Option<Uuid>,
    pub mentor: Option<MentorRef>,
    pub adno: String,
    pub class: String,
    pub photo: String,
    pub points: i32,
    pub is_coordinator: bool,
    pub personal_details: Value,
    pub academic_details: Value,
    pub mentorship_details: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role")]
pub enum AppUser {
    Admin(AdminUser),
    Mentor(MentorUser),
    Mentee(MenteeUser),
}

impl AppUser {
    pub fn id(&self) -> Uuid {
        match self {
            AppUser::Admin(u) => u.id,
            AppUser::Mentor(u) => u.id,
            AppUser::Mentee(u) => u.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AppUser::Admin(u) => &u.name,
            AppUser::Mentor(u) => &u.name,
            AppUser::Mentee(u) => &u.name,
        }
    }

    pub fn role(&self) -> RoleEnum {
        match self {
            AppUser::Admin(_) => RoleEnum::Admin,
            AppUser::Mentor(_) => RoleEnum::Mentor,
            AppUser::Mentee(_) => RoleEnum::Mentee,
        }
    }
}

fn empty_details() -> Value {
    Value::Object(Default::default())
}

/// Pure shaping of a profile (plus, for mentees, the extension row and
/// an optional mentor snapshot) into the tagged union.
pub fn shape_user(
    profile: &profile::Model,
    mentee_row: Option<&mentee_data::Model>,
    mentor: Option<MentorRef>,
) -> AppUser {
    match profile.role {
        RoleEnum::Admin => AppUser::Admin(AdminUser {
            id: profile.id,
            username: profile.username.clone(),
            name: profile.name.clone(),
        }),
        RoleEnum::Mentor => AppUser::Mentor(MentorUser {
            id: profile.id,
            username: profile.username.clone(),
            name: profile.name.clone(),
            mentees: Vec::new(),
            photo: profile.photo_url.clone(),
        }),
        RoleEnum::Mentee => match mentee_row {
            Some(row) => AppUser::Mentee(MenteeUser {
                id: profile.id,
                username: profile.username.clone(),
                name: profile.name.clone(),
                mentor_id: Some(row.mentor_id),
                mentor,
                adno: row.adno.clone(),
                class: row.class.clone(),
                photo: row
                    .photo_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PHOTO_URL.to_string()),
                points: row.points,
                is_coordinator: row.is_coordinator,
                personal_details: row.personal_details.clone().unwrap_or_else(empty_details),
                academic_details: row.academic_details.clone().unwrap_or_else(empty_details),
                mentorship_details: row.mentorship_details.clone().unwrap_or_else(empty_details),
            }),
            // Incomplete mentee: identity exists, extension row pending.
            None => AppUser::Mentee(MenteeUser {
                id: profile.id,
                username: profile.username.clone(),
                name: profile.name.clone(),
                mentor_id: None,
                mentor: None,
                adno: String::new(),
                class: String::new(),
                photo: DEFAULT_PHOTO_URL.to_string(),
                points: 0,
                is_coordinator: false,
                personal_details: empty_details(),
                academic_details: empty_details(),
                mentorship_details: empty_details(),
            }),
        },
    }
}

pub fn mentor_ref(profile: &profile::Model) -> MentorRef {
    MentorRef {
        id: profile.id,
        name: profile.name.clone(),
        username: profile.username.clone(),
        role: profile.role,
    }
}

/// Fetches everything needed to shape a user by id. `Ok(None)` when the
/// profile does not exist.
pub async fn resolve_user_by_id(user_id: Uuid) -> ServiceResult<Option<AppUser>> {
    let profiles = ProfileRepository::new();
    let Some(profile) = profiles.find_by_id(user_id).await? else {
        return Ok(None);
    };

    if profile.role != RoleEnum::Mentee {
        return Ok(Some(shape_user(&profile, None, None)));
    }

    let mentee_row = MenteeRepository::new().find_by_profile_id(profile.id).await?;
    let mentor = match &mentee_row {
        Some(row) => profiles
            .find_by_id(row.mentor_id)
            .await?
            .map(|p| mentor_ref(&p)),
        None => None,
    };

    Ok(Some(shape_user(&profile, mentee_row.as_ref(), mentor)))
}

/// Resolves the active session into a shaped user. A live session whose
/// profile row has vanished is not trustworthy: the adapter is signed
/// out and `Ok(None)` returned instead of a partial user.
pub async fn resolve_current_user(identity: &IdentityAdapter) -> ServiceResult<Option<AppUser>> {
    let Some(session) = identity.current_session() else {
        return Ok(None);
    };

    match resolve_user_by_id(session.user_id).await? {
        Some(user) => Ok(Some(user)),
        None => {
            tracing::warn!(user_id = %session.user_id, "profile missing for active session, signing out");
            identity.sign_out();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn profile(role: RoleEnum) -> profile::Model {
        let now = Utc::now().naive_utc();
        profile::Model {
            id: Uuid::new_v4(),
            username: "asha".to_string(),
            name: "Asha Nair".to_string(),
            role,
            password: "hash".to_string(),
            photo_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn mentee_row(profile_id: Uuid, mentor_id: Uuid) -> mentee_data::Model {
        let now = Utc::now().naive_utc();
        mentee_data::Model {
            profile_id,
            mentor_id,
            adno: "1042".to_string(),
            class: "CS-3A".to_string(),
            photo_url: Some("https://cdn.example/p.png".to_string()),
            points: 35,
            is_coordinator: true,
            personal_details: Some(json!({ "dob": "2004-01-15" })),
            academic_details: None,
            mentorship_details: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn shapes_admin_passthrough() {
        let p = profile(RoleEnum::Admin);
        match shape_user(&p, None, None) {
            AppUser::Admin(admin) => {
                assert_eq!(admin.id, p.id);
                assert_eq!(admin.username, "asha");
            }
            other => panic!("expected admin, got {other:?}"),
        }
    }

    #[test]
    fn shapes_mentor_with_lazy_mentee_list() {
        let mut p = profile(RoleEnum::Mentor);
        p.photo_url = Some("https://cdn.example/m.png".to_string());
        match shape_user(&p, None, None) {
            AppUser::Mentor(mentor) => {
                assert!(mentor.mentees.is_empty());
                assert_eq!(mentor.photo.as_deref(), Some("https://cdn.example/m.png"));
            }
            other => panic!("expected mentor, got {other:?}"),
        }
    }

    #[test]
    fn shapes_complete_mentee_with_mentor_snapshot() {
        let p = profile(RoleEnum::Mentee);
        let mentor_profile = profile(RoleEnum::Mentor);
        let row = mentee_row(p.id, mentor_profile.id);
        let shaped = shape_user(&p, Some(&row), Some(mentor_ref(&mentor_profile)));

        match shaped {
            AppUser::Mentee(mentee) => {
                assert_eq!(mentee.mentor_id, Some(mentor_profile.id));
                assert_eq!(mentee.points, 35);
                assert!(mentee.is_coordinator);
                assert_eq!(mentee.mentor.unwrap().id, mentor_profile.id);
                // absent blobs come back as empty objects, not null
                assert_eq!(mentee.academic_details, json!({}));
            }
            other => panic!("expected mentee, got {other:?}"),
        }
    }

    #[test]
    fn scaffolds_incomplete_mentee_instead_of_failing() {
        let p = profile(RoleEnum::Mentee);
        match shape_user(&p, None, None) {
            AppUser::Mentee(mentee) => {
                assert_eq!(mentee.mentor_id, None);
                assert_eq!(mentee.points, 0);
                assert_eq!(mentee.adno, "");
                assert_eq!(mentee.photo, DEFAULT_PHOTO_URL);
                assert_eq!(mentee.personal_details, json!({}));
            }
            other => panic!("expected mentee, got {other:?}"),
        }
    }

    #[test]
    fn role_discriminant_matches_variant() {
        assert_eq!(shape_user(&profile(RoleEnum::Admin), None, None).role(), RoleEnum::Admin);
        assert_eq!(shape_user(&profile(RoleEnum::Mentee), None, None).role(), RoleEnum::Mentee);
    }
}
