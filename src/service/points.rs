//! Points ledger. The balance on the mentee row is maintained by an
//! atomic in-database increment alongside each ledger entry.

use uuid::Uuid;

use crate::entities::points_log;
use crate::error::{ServiceError, ServiceResult};
use crate::repositories::PointsRepository;
use crate::service::DomainService;

/// Ledger-derived balance. The cached `points` column on the mentee row
/// must equal this sum; dashboards use it to audit the cache.
pub fn total_points(log: &[points_log::Model]) -> i64 {
    log.iter().map(|entry| i64::from(entry.points)).sum()
}

impl DomainService {
    /// `delta` may be negative; balances are allowed below zero.
    pub async fn add_points(
        &self,
        mentee_id: Uuid,
        delta: i32,
        reason: String,
    ) -> ServiceResult<points_log::Model> {
        if delta == 0 {
            return Err(ServiceError::validation("Points change cannot be zero."));
        }
        if reason.trim().is_empty() {
            return Err(ServiceError::validation("A reason is required."));
        }

        let entry = PointsRepository::new()
            .add_points(mentee_id, delta, reason)
            .await
            .map_err(|e| {
                if e.to_string().contains("Mentee data not found") {
                    ServiceError::not_found("Mentee data not found")
                } else {
                    e.into()
                }
            })?;
        Ok(entry)
    }

    pub async fn get_points_log_for_mentee(
        &self,
        mentee_id: Uuid,
    ) -> ServiceResult<Vec<points_log::Model>> {
        let found = PointsRepository::new().find_by_mentee(mentee_id).await?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(points: i32) -> points_log::Model {
        points_log::Model {
            id: Uuid::new_v4(),
            mentee_id: Uuid::new_v4(),
            points,
            reason: "test".to_string(),
            timestamp: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn balance_sums_signed_deltas() {
        let log = vec![entry(10), entry(-3), entry(5)];
        assert_eq!(total_points(&log), 12);
    }

    #[test]
    fn empty_ledger_is_zero() {
        assert_eq!(total_points(&[]), 0);
    }
}
