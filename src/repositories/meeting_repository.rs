use crate::entities::meeting;
use crate::entities::sea_orm_active_enums::MeetingType;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct MeetingRepository;

impl MeetingRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn create(
        &self,
        mentor_id: Uuid,
        mentee_ids: Vec<Uuid>,
        meeting_type: MeetingType,
        date: NaiveDate,
        notes: String,
    ) -> Result<meeting::Model> {
        let db = self.get_connection();
        let model = meeting::ActiveModel {
            id: Set(Uuid::new_v4()),
            mentor_id: Set(mentor_id),
            mentee_ids: Set(mentee_ids),
            r#type: Set(meeting_type),
            date: Set(date),
            notes: Set(notes),
        };
        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<meeting::Model>> {
        let db = self.get_connection();
        let found = meeting::Entity::find()
            .filter(meeting::Column::MentorId.eq(mentor_id))
            .order_by_desc(meeting::Column::Date)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn find_containing_mentee(&self, mentee_id: Uuid) -> Result<Vec<meeting::Model>> {
        let db = self.get_connection();
        let found = meeting::Entity::find()
            .filter(Expr::cust_with_values("? = ANY(mentee_ids)", [mentee_id]))
            .order_by_desc(meeting::Column::Date)
            .all(db)
            .await?;
        Ok(found)
    }

    /// All meetings on or after the cutoff, fetched in one query so the
    /// warning engine can evaluate every mentee in-process.
    pub async fn find_since(&self, cutoff: NaiveDate) -> Result<Vec<meeting::Model>> {
        let db = self.get_connection();
        let found = meeting::Entity::find()
            .filter(meeting::Column::Date.gte(cutoff))
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn find_all(&self) -> Result<Vec<meeting::Model>> {
        let db = self.get_connection();
        let found = meeting::Entity::find().all(db).await?;
        Ok(found)
    }
}
