//! Assignments and the submission lifecycle
//! (Pending -> Submitted -> Completed, never backwards).

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::entities::assignment;
use crate::entities::sea_orm_active_enums::SubmissionStatus;
use crate::entities::submission;
use crate::error::{ServiceError, ServiceResult};
use crate::repositories::{AssignmentRepository, SubmissionRepository};
use crate::service::DomainService;

/// An assignment plus its linked mentee ids, the shape views work with.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentView {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub title: String,
    pub instructions: String,
    pub due_date: NaiveDate,
    pub mentee_ids: Vec<Uuid>,
}

impl AssignmentView {
    fn from_model(model: assignment::Model, mentee_ids: Vec<Uuid>) -> Self {
        Self {
            id: model.id,
            mentor_id: model.mentor_id,
            title: model.title,
            instructions: model.instructions,
            due_date: model.due_date,
            mentee_ids,
        }
    }
}

/// What `complete_submission` should do given the stored status.
/// `None` means no row, i.e. the mentee has not submitted.
#[derive(Debug, PartialEq, Eq)]
enum CompletionAction {
    Reject,
    NoOp,
    Complete,
}

fn completion_action(current: Option<SubmissionStatus>) -> CompletionAction {
    match current {
        None | Some(SubmissionStatus::Pending) => CompletionAction::Reject,
        Some(SubmissionStatus::Completed) => CompletionAction::NoOp,
        Some(SubmissionStatus::Submitted) => CompletionAction::Complete,
    }
}

impl DomainService {
    /// The assignment row and its mentee links are written separately.
    /// If linking fails the assignment is kept as an orphan reachable
    /// from the mentor's list; the error says so.
    pub async fn create_assignment(
        &self,
        mentor_id: Uuid,
        title: String,
        instructions: String,
        due_date: NaiveDate,
        mentee_ids: Vec<Uuid>,
    ) -> ServiceResult<AssignmentView> {
        if title.trim().is_empty() {
            return Err(ServiceError::validation("Title is required."));
        }
        if mentee_ids.is_empty() {
            return Err(ServiceError::validation(
                "Select at least one mentee for the assignment.",
            ));
        }

        let repo = AssignmentRepository::new();
        let created = repo
            .create(mentor_id, title, instructions, due_date)
            .await?;

        if let Err(e) = repo.link_mentees(created.id, &mentee_ids).await {
            return Err(ServiceError::PartialFailure(format!(
                "assignment {} created but mentee links failed: {e}",
                created.id
            )));
        }

        Ok(AssignmentView::from_model(created, mentee_ids))
    }

    pub async fn delete_assignment(&self, assignment_id: Uuid) -> ServiceResult<()> {
        AssignmentRepository::new().delete(assignment_id).await?;
        Ok(())
    }

    pub async fn get_assignments_by_mentor(
        &self,
        mentor_id: Uuid,
    ) -> ServiceResult<Vec<AssignmentView>> {
        let repo = AssignmentRepository::new();
        let mut views = Vec::new();
        for model in repo.find_by_mentor(mentor_id).await? {
            let mentee_ids = repo.linked_mentee_ids(model.id).await?;
            views.push(AssignmentView::from_model(model, mentee_ids));
        }
        Ok(views)
    }

    pub async fn get_assignments_by_mentee(
        &self,
        mentee_id: Uuid,
    ) -> ServiceResult<Vec<AssignmentView>> {
        let repo = AssignmentRepository::new();
        let mut views = Vec::new();
        for model in repo.find_by_mentee(mentee_id).await? {
            let mentee_ids = repo.linked_mentee_ids(model.id).await?;
            views.push(AssignmentView::from_model(model, mentee_ids));
        }
        Ok(views)
    }

    /// `Ok(None)` means the submission is Pending, not missing.
    pub async fn get_submission(
        &self,
        assignment_id: Uuid,
        mentee_id: Uuid,
    ) -> ServiceResult<Option<submission::Model>> {
        let found = SubmissionRepository::new()
            .find(assignment_id, mentee_id)
            .await?;
        Ok(found)
    }

    pub async fn get_submissions_by_assignment(
        &self,
        assignment_id: Uuid,
    ) -> ServiceResult<Vec<submission::Model>> {
        let found = SubmissionRepository::new()
            .find_by_assignment(assignment_id)
            .await?;
        Ok(found)
    }

    /// Mentee-side submission. Re-submitting replaces the file and
    /// refreshes the timestamp; a Completed submission cannot be moved
    /// back to Submitted.
    pub async fn submit_assignment(
        &self,
        assignment_id: Uuid,
        mentee_id: Uuid,
        file_url: Option<String>,
    ) -> ServiceResult<submission::Model> {
        let assignments = AssignmentRepository::new();
        if !assignments.is_mentee_linked(assignment_id, mentee_id).await? {
            return Err(ServiceError::validation(
                "You are not assigned to this assignment.",
            ));
        }

        let submissions = SubmissionRepository::new();
        if let Some(existing) = submissions.find(assignment_id, mentee_id).await?
            && existing.status == SubmissionStatus::Completed
        {
            return Err(ServiceError::InvalidTransition(
                "This submission has already been marked complete.".to_string(),
            ));
        }

        let row = submissions
            .upsert(assignment_id, mentee_id, SubmissionStatus::Submitted, file_url)
            .await?;
        Ok(row)
    }

    /// Mentor-side equivalent of `submit_assignment`, for recording a
    /// submission handed in outside the system. Keeps any file already
    /// attached.
    pub async fn record_submission(
        &self,
        assignment_id: Uuid,
        mentee_id: Uuid,
    ) -> ServiceResult<submission::Model> {
        let assignments = AssignmentRepository::new();
        if !assignments.is_mentee_linked(assignment_id, mentee_id).await? {
            return Err(ServiceError::validation(
                "This mentee is not assigned to this assignment.",
            ));
        }

        let submissions = SubmissionRepository::new();
        let existing = submissions.find(assignment_id, mentee_id).await?;
        if let Some(row) = &existing
            && row.status == SubmissionStatus::Completed
        {
            return Err(ServiceError::InvalidTransition(
                "This submission has already been marked complete.".to_string(),
            ));
        }
        let file_url = existing.and_then(|r| r.file_url);

        let row = submissions
            .upsert(assignment_id, mentee_id, SubmissionStatus::Submitted, file_url)
            .await?;
        Ok(row)
    }

    /// Marks a Submitted submission Completed. Completing an already
    /// Completed submission is a no-op; completing one that was never
    /// submitted is rejected.
    pub async fn complete_submission(
        &self,
        assignment_id: Uuid,
        mentee_id: Uuid,
    ) -> ServiceResult<submission::Model> {
        let submissions = SubmissionRepository::new();
        let existing = submissions.find(assignment_id, mentee_id).await?;

        match completion_action(existing.as_ref().map(|r| r.status)) {
            CompletionAction::Reject => Err(ServiceError::InvalidTransition(
                "Cannot complete a submission that has not been submitted.".to_string(),
            )),
            CompletionAction::NoOp => {
                // existing is Some here by construction.
                existing.ok_or_else(|| {
                    ServiceError::Internal(anyhow::anyhow!("completed submission row vanished"))
                })
            }
            CompletionAction::Complete => {
                let file_url = existing.and_then(|r| r.file_url);
                let row = submissions
                    .upsert(assignment_id, mentee_id, SubmissionStatus::Completed, file_url)
                    .await?;
                Ok(row)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_rejects_unsubmitted() {
        assert_eq!(completion_action(None), CompletionAction::Reject);
        assert_eq!(
            completion_action(Some(SubmissionStatus::Pending)),
            CompletionAction::Reject
        );
    }

    #[test]
    fn completion_is_idempotent() {
        assert_eq!(
            completion_action(Some(SubmissionStatus::Completed)),
            CompletionAction::NoOp
        );
    }

    #[test]
    fn completion_advances_submitted() {
        assert_eq!(
            completion_action(Some(SubmissionStatus::Submitted)),
            CompletionAction::Complete
        );
    }
}
