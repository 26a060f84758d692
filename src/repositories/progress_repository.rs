use crate::entities::progress_record;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct ProgressRepository;

impl ProgressRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<progress_record::Model>> {
        let db = self.get_connection();
        let found = progress_record::Entity::find_by_id(id).one(db).await?;
        Ok(found)
    }

    pub async fn find_by_mentee(&self, mentee_id: Uuid) -> Result<Vec<progress_record::Model>> {
        let db = self.get_connection();
        let found = progress_record::Entity::find()
            .filter(progress_record::Column::MenteeId.eq(mentee_id))
            .order_by_desc(progress_record::Column::MeetingDate)
            .all(db)
            .await?;
        Ok(found)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        mentor_id: Uuid,
        mentee_id: Uuid,
        meeting_date: NaiveDate,
        key_topics_discussed: String,
        mentee_action_items: String,
        mentor_action_items: String,
        milestones_wins: String,
        key_insights: String,
    ) -> Result<progress_record::Model> {
        let db = self.get_connection();
        let model = progress_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            mentor_id: Set(mentor_id),
            mentee_id: Set(mentee_id),
            meeting_date: Set(meeting_date),
            key_topics_discussed: Set(key_topics_discussed),
            mentee_action_items: Set(mentee_action_items),
            mentor_action_items: Set(mentor_action_items),
            milestones_wins: Set(milestones_wins),
            key_insights: Set(key_insights),
        };
        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(&self, id: Uuid, updates: ProgressUpdate) -> Result<progress_record::Model> {
        let row = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Progress record not found"))?;
        let db = self.get_connection();

        let mut active: progress_record::ActiveModel = row.into();

        if let Some(meeting_date) = updates.meeting_date {
            active.meeting_date = Set(meeting_date);
        }
        if let Some(key_topics_discussed) = updates.key_topics_discussed {
            active.key_topics_discussed = Set(key_topics_discussed);
        }
        if let Some(mentee_action_items) = updates.mentee_action_items {
            active.mentee_action_items = Set(mentee_action_items);
        }
        if let Some(mentor_action_items) = updates.mentor_action_items {
            active.mentor_action_items = Set(mentor_action_items);
        }
        if let Some(milestones_wins) = updates.milestones_wins {
            active.milestones_wins = Set(milestones_wins);
        }
        if let Some(key_insights) = updates.key_insights {
            active.key_insights = Set(key_insights);
        }

        let result = active.update(db).await?;
        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let db = self.get_connection();
        progress_record::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct ProgressUpdate {
    pub meeting_date: Option<NaiveDate>,
    pub key_topics_discussed: Option<String>,
    pub mentee_action_items: Option<String>,
    pub mentor_action_items: Option<String>,
    pub milestones_wins: Option<String>,
    pub key_insights: Option<String>,
}
