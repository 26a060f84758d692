//! Warning engine: insufficient-contact detection over a trailing
//! one-month window. Read-only; re-run on demand by the dashboards.

use chrono::{Months, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::meeting;
use crate::error::ServiceResult;
use crate::repositories::{MeetingRepository, MenteeRepository, ProfileRepository};

pub const MIN_MEETINGS_PER_MONTH: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub mentee_id: Uuid,
    pub mentee_name: String,
    pub mentor_id: Uuid,
    pub reason: String,
}

/// A mentee's identity plus ownership, the only inputs evaluation needs.
#[derive(Debug, Clone)]
pub struct MenteeContact {
    pub mentee_id: Uuid,
    pub mentee_name: String,
    pub mentor_id: Uuid,
}

pub fn one_month_before(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(1))
        .unwrap_or(NaiveDate::MIN)
}

/// Pure evaluation over a pre-fetched meeting set: a mentee with fewer
/// than `MIN_MEETINGS_PER_MONTH` meetings dated inside the window gets a
/// warning.
pub fn evaluate(
    mentees: &[MenteeContact],
    recent_meetings: &[meeting::Model],
    cutoff: NaiveDate,
) -> Vec<Warning> {
    mentees
        .iter()
        .filter_map(|m| {
            let count = recent_meetings
                .iter()
                .filter(|meeting| meeting.date >= cutoff && meeting.mentee_ids.contains(&m.mentee_id))
                .count();
            if count < MIN_MEETINGS_PER_MONTH {
                Some(Warning {
                    mentee_id: m.mentee_id,
                    mentee_name: m.mentee_name.clone(),
                    mentor_id: m.mentor_id,
                    reason: "Less than 1 meeting logged in the last month.".to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

async fn contacts_for(mentor_id: Option<Uuid>) -> ServiceResult<Vec<MenteeContact>> {
    let mentee_repo = MenteeRepository::new();
    let profile_repo = ProfileRepository::new();

    let rows = match mentor_id {
        Some(id) => mentee_repo.find_by_mentor_id(id).await?,
        None => mentee_repo.find_all().await?,
    };

    let mut contacts = Vec::with_capacity(rows.len());
    for row in rows {
        let name = profile_repo
            .find_by_id(row.profile_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_default();
        contacts.push(MenteeContact {
            mentee_id: row.profile_id,
            mentee_name: name,
            mentor_id: row.mentor_id,
        });
    }
    Ok(contacts)
}

async fn run_check(mentor_id: Option<Uuid>) -> ServiceResult<Vec<Warning>> {
    let cutoff = one_month_before(Utc::now().date_naive());
    let mentees = contacts_for(mentor_id).await?;
    // One fetch for the whole window instead of a query per mentee.
    let recent = MeetingRepository::new().find_since(cutoff).await?;
    Ok(evaluate(&mentees, &recent, cutoff))
}

/// Compliance pass over every mentee, for the admin dashboard.
pub async fn run_monthly_check() -> ServiceResult<Vec<Warning>> {
    run_check(None).await
}

/// Same pass scoped to one mentor's mentees.
pub async fn run_mentor_monthly_check(mentor_id: Uuid) -> ServiceResult<Vec<Warning>> {
    run_check(Some(mentor_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::MeetingType;

    fn contact(name: &str) -> MenteeContact {
        MenteeContact {
            mentee_id: Uuid::new_v4(),
            mentee_name: name.to_string(),
            mentor_id: Uuid::new_v4(),
        }
    }

    fn meeting_on(date: NaiveDate, mentee_ids: Vec<Uuid>) -> meeting::Model {
        meeting::Model {
            id: Uuid::new_v4(),
            mentor_id: Uuid::new_v4(),
            mentee_ids,
            r#type: MeetingType::Personal,
            date,
            notes: String::new(),
        }
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn mentee_with_recent_meeting_passes() {
        let m = contact("Asha");
        let cutoff = d("2024-05-01");
        let meetings = vec![meeting_on(d("2024-05-20"), vec![m.mentee_id])];
        assert!(evaluate(&[m], &meetings, cutoff).is_empty());
    }

    #[test]
    fn mentee_with_no_meetings_is_flagged() {
        let m = contact("Asha");
        let warnings = evaluate(&[m.clone()], &[], d("2024-05-01"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].mentee_id, m.mentee_id);
        assert_eq!(warnings[0].mentor_id, m.mentor_id);
        assert_eq!(
            warnings[0].reason,
            "Less than 1 meeting logged in the last month."
        );
    }

    #[test]
    fn stale_meeting_does_not_count() {
        let m = contact("Asha");
        let cutoff = d("2024-05-01");
        let meetings = vec![meeting_on(d("2024-03-02"), vec![m.mentee_id])];
        assert_eq!(evaluate(&[m], &meetings, cutoff).len(), 1);
    }

    #[test]
    fn meeting_for_someone_else_does_not_count() {
        let m = contact("Asha");
        let other = Uuid::new_v4();
        let cutoff = d("2024-05-01");
        let meetings = vec![meeting_on(d("2024-05-20"), vec![other])];
        assert_eq!(evaluate(&[m], &meetings, cutoff).len(), 1);
    }

    #[test]
    fn group_meeting_counts_for_each_member() {
        let a = contact("Asha");
        let b = contact("Vikram");
        let cutoff = d("2024-05-01");
        let meetings = vec![meeting_on(
            d("2024-05-10"),
            vec![a.mentee_id, b.mentee_id],
        )];
        assert!(evaluate(&[a, b], &meetings, cutoff).is_empty());
    }

    #[test]
    fn window_is_one_calendar_month() {
        assert_eq!(one_month_before(d("2024-06-15")), d("2024-05-15"));
        assert_eq!(one_month_before(d("2024-03-31")), d("2024-02-29"));
    }
}
