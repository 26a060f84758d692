use crate::entities::scheduled_meeting;
use crate::entities::sea_orm_active_enums::{MeetingType, ScheduledStatus};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct ScheduledMeetingRepository;

impl ScheduledMeetingRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<scheduled_meeting::Model>> {
        let db = self.get_connection();
        let found = scheduled_meeting::Entity::find_by_id(id).one(db).await?;
        Ok(found)
    }

    pub async fn create(
        &self,
        mentor_id: Uuid,
        mentee_ids: Vec<Uuid>,
        meeting_type: MeetingType,
        date: NaiveDate,
        time: String,
        agenda: String,
    ) -> Result<scheduled_meeting::Model> {
        let db = self.get_connection();
        let model = scheduled_meeting::ActiveModel {
            id: Set(Uuid::new_v4()),
            mentor_id: Set(mentor_id),
            mentee_ids: Set(mentee_ids),
            r#type: Set(meeting_type),
            date: Set(date),
            time: Set(time),
            agenda: Set(agenda),
            status: Set(ScheduledStatus::Planned),
        };
        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<scheduled_meeting::Model>> {
        let db = self.get_connection();
        let found = scheduled_meeting::Entity::find()
            .filter(scheduled_meeting::Column::MentorId.eq(mentor_id))
            .order_by_asc(scheduled_meeting::Column::Date)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn find_containing_mentee(
        &self,
        mentee_id: Uuid,
    ) -> Result<Vec<scheduled_meeting::Model>> {
        let db = self.get_connection();
        let found = scheduled_meeting::Entity::find()
            .filter(Expr::cust_with_values("? = ANY(mentee_ids)", [mentee_id]))
            .order_by_asc(scheduled_meeting::Column::Date)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: ScheduledStatus,
    ) -> Result<scheduled_meeting::Model> {
        let row = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Scheduled meeting not found"))?;
        let db = self.get_connection();

        let mut active: scheduled_meeting::ActiveModel = row.into();
        active.status = Set(status);

        let result = active.update(db).await?;
        Ok(result)
    }
}
