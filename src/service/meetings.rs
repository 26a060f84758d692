//! Logged meetings (historical record) and scheduled meetings
//! (forward-looking plans with a Planned/Completed/Cancelled lifecycle).

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{MeetingType, RoleEnum, ScheduledStatus};
use crate::entities::{meeting, scheduled_meeting};
use crate::error::{ServiceError, ServiceResult};
use crate::repositories::{MeetingRepository, ScheduledMeetingRepository};
use crate::service::DomainService;

/// Result of completing a scheduled meeting: the updated plan row and
/// the historical meeting written from it.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedScheduledMeeting {
    pub scheduled: scheduled_meeting::Model,
    pub logged: meeting::Model,
}

/// Whether a scheduled meeting may leave its current status. Planned is
/// the only non-terminal state.
fn guard_planned(status: ScheduledStatus, verb: &str) -> ServiceResult<()> {
    if status != ScheduledStatus::Planned {
        return Err(ServiceError::InvalidTransition(format!(
            "Only a planned meeting can be {verb}."
        )));
    }
    Ok(())
}

impl DomainService {
    pub async fn log_meeting(
        &self,
        mentor_id: Uuid,
        mentee_ids: Vec<Uuid>,
        meeting_type: MeetingType,
        date: NaiveDate,
        notes: String,
    ) -> ServiceResult<meeting::Model> {
        if mentee_ids.is_empty() {
            return Err(ServiceError::validation(
                "Select at least one mentee for the meeting.",
            ));
        }
        let created = MeetingRepository::new()
            .create(mentor_id, mentee_ids, meeting_type, date, notes)
            .await?;
        Ok(created)
    }

    /// Role-scoped meeting history: mentors see the meetings they ran,
    /// everyone else the meetings they attended.
    pub async fn get_meetings(
        &self,
        user_id: Uuid,
        role: RoleEnum,
    ) -> ServiceResult<Vec<meeting::Model>> {
        let repo = MeetingRepository::new();
        let found = match role {
            RoleEnum::Mentor => repo.find_by_mentor(user_id).await?,
            _ => repo.find_containing_mentee(user_id).await?,
        };
        Ok(found)
    }

    pub async fn get_meetings_for_mentee(
        &self,
        mentee_id: Uuid,
    ) -> ServiceResult<Vec<meeting::Model>> {
        let found = MeetingRepository::new()
            .find_containing_mentee(mentee_id)
            .await?;
        Ok(found)
    }

    pub async fn get_all_meetings_for_stats(&self) -> ServiceResult<Vec<meeting::Model>> {
        let found = MeetingRepository::new().find_all().await?;
        Ok(found)
    }

    pub async fn schedule_meeting(
        &self,
        mentor_id: Uuid,
        mentee_ids: Vec<Uuid>,
        meeting_type: MeetingType,
        date: NaiveDate,
        time: String,
        agenda: String,
    ) -> ServiceResult<scheduled_meeting::Model> {
        if mentee_ids.is_empty() {
            return Err(ServiceError::validation(
                "Select at least one mentee for the meeting.",
            ));
        }
        let created = ScheduledMeetingRepository::new()
            .create(mentor_id, mentee_ids, meeting_type, date, time, agenda)
            .await?;
        Ok(created)
    }

    pub async fn get_scheduled_meetings(
        &self,
        user_id: Uuid,
        role: RoleEnum,
    ) -> ServiceResult<Vec<scheduled_meeting::Model>> {
        let repo = ScheduledMeetingRepository::new();
        let found = match role {
            RoleEnum::Mentor => repo.find_by_mentor(user_id).await?,
            _ => repo.find_containing_mentee(user_id).await?,
        };
        Ok(found)
    }

    pub async fn cancel_scheduled_meeting(
        &self,
        meeting_id: Uuid,
    ) -> ServiceResult<scheduled_meeting::Model> {
        let repo = ScheduledMeetingRepository::new();
        let row = repo
            .find_by_id(meeting_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Scheduled meeting not found"))?;
        guard_planned(row.status, "cancelled")?;

        let updated = repo.set_status(meeting_id, ScheduledStatus::Cancelled).await?;
        Ok(updated)
    }

    /// Completes the plan and writes the historical meeting from it,
    /// agenda becoming the notes. The two writes are not atomic: if the
    /// history insert fails, the plan stays Completed and the error
    /// tells the caller to log the meeting manually.
    pub async fn complete_scheduled_meeting(
        &self,
        meeting_id: Uuid,
    ) -> ServiceResult<CompletedScheduledMeeting> {
        let repo = ScheduledMeetingRepository::new();
        let row = repo
            .find_by_id(meeting_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Scheduled meeting not found"))?;
        guard_planned(row.status, "completed")?;

        let scheduled = repo.set_status(meeting_id, ScheduledStatus::Completed).await?;

        let logged = MeetingRepository::new()
            .create(
                scheduled.mentor_id,
                scheduled.mentee_ids.clone(),
                scheduled.r#type,
                scheduled.date,
                scheduled.agenda.clone(),
            )
            .await
            .map_err(|e| {
                ServiceError::PartialFailure(format!(
                    "scheduled meeting {meeting_id} marked completed but the meeting log failed, log it manually: {e}"
                ))
            })?;

        Ok(CompletedScheduledMeeting { scheduled, logged })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_may_transition() {
        assert!(guard_planned(ScheduledStatus::Planned, "cancelled").is_ok());
    }

    #[test]
    fn terminal_states_are_locked() {
        for status in [ScheduledStatus::Completed, ScheduledStatus::Cancelled] {
            assert!(matches!(
                guard_planned(status, "completed"),
                Err(ServiceError::InvalidTransition(_))
            ));
        }
    }
}
