use crate::entities::{mentee_data, points_log};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

pub struct PointsRepository;

impl PointsRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Appends the ledger entry and bumps the cached total in one
    /// transaction, using a server-side `points = points + delta` so
    /// concurrent awards for the same mentee cannot lose an update.
    /// Returns the inserted entry so callers never have to re-query a
    /// ledger that other awards may be appending to.
    pub async fn add_points(
        &self,
        mentee_id: Uuid,
        delta: i32,
        reason: String,
    ) -> Result<points_log::Model> {
        let db = self.get_connection();
        let txn = db.begin().await?;

        let entry = ledger_entry(mentee_id, delta, reason);
        let inserted = entry.insert(&txn).await?;

        let updated = mentee_data::Entity::update_many()
            .col_expr(
                mentee_data::Column::Points,
                Expr::col(mentee_data::Column::Points).add(delta),
            )
            .col_expr(
                mentee_data::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().naive_utc()),
            )
            .filter(mentee_data::Column::ProfileId.eq(mentee_id))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            txn.rollback().await?;
            anyhow::bail!("Mentee data not found");
        }

        txn.commit().await?;
        Ok(inserted)
    }

    pub async fn find_by_mentee(&self, mentee_id: Uuid) -> Result<Vec<points_log::Model>> {
        let db = self.get_connection();
        let found = points_log::Entity::find()
            .filter(points_log::Column::MenteeId.eq(mentee_id))
            .order_by_desc(points_log::Column::Timestamp)
            .all(db)
            .await?;
        Ok(found)
    }
}

fn ledger_entry(mentee_id: Uuid, delta: i32, reason: String) -> points_log::ActiveModel {
    points_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        mentee_id: Set(mentee_id),
        points: Set(delta),
        reason: Set(reason),
        timestamp: Set(chrono::Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_entry_keeps_the_signed_delta() {
        let mentee_id = Uuid::new_v4();
        let entry = ledger_entry(mentee_id, -5, "late submission".to_string());
        assert_eq!(entry.points, Set(-5));
        assert_eq!(entry.mentee_id, Set(mentee_id));
    }

    #[test]
    fn each_entry_has_its_own_id() {
        let mentee_id = Uuid::new_v4();
        let a = ledger_entry(mentee_id, 1, "a".to_string());
        let b = ledger_entry(mentee_id, 1, "b".to_string());
        assert_ne!(a.id, b.id);
    }
}
