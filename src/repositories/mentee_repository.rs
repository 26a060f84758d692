use crate::entities::mentee_data;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;
use uuid::Uuid;

pub struct MenteeRepository;

impl MenteeRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_profile_id(&self, profile_id: Uuid) -> Result<Option<mentee_data::Model>> {
        let db = self.get_connection();
        let found = mentee_data::Entity::find_by_id(profile_id).one(db).await?;
        Ok(found)
    }

    pub async fn find_by_mentor_id(&self, mentor_id: Uuid) -> Result<Vec<mentee_data::Model>> {
        let db = self.get_connection();
        let found = mentee_data::Entity::find()
            .filter(mentee_data::Column::MentorId.eq(mentor_id))
            .order_by_asc(mentee_data::Column::Adno)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn find_all(&self) -> Result<Vec<mentee_data::Model>> {
        let db = self.get_connection();
        let found = mentee_data::Entity::find()
            .order_by_asc(mentee_data::Column::Adno)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn create(&self, data: NewMenteeData) -> Result<mentee_data::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = mentee_data::ActiveModel {
            profile_id: Set(data.profile_id),
            mentor_id: Set(data.mentor_id),
            adno: Set(data.adno),
            class: Set(data.class),
            photo_url: Set(data.photo_url),
            points: Set(0),
            is_coordinator: Set(data.is_coordinator),
            personal_details: Set(data.personal_details),
            academic_details: Set(data.academic_details),
            mentorship_details: Set(data.mentorship_details),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(
        &self,
        profile_id: Uuid,
        updates: MenteeDataUpdate,
    ) -> Result<mentee_data::Model> {
        let row = self
            .find_by_profile_id(profile_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Mentee data not found"))?;
        let db = self.get_connection();

        let mut active: mentee_data::ActiveModel = row.into();

        if let Some(adno) = updates.adno {
            active.adno = Set(adno);
        }
        if let Some(class) = updates.class {
            active.class = Set(class);
        }
        if let Some(photo_url) = updates.photo_url {
            active.photo_url = Set(Some(photo_url));
        }
        if let Some(is_coordinator) = updates.is_coordinator {
            active.is_coordinator = Set(is_coordinator);
        }
        if let Some(personal_details) = updates.personal_details {
            active.personal_details = Set(Some(personal_details));
        }
        if let Some(academic_details) = updates.academic_details {
            active.academic_details = Set(Some(academic_details));
        }
        if let Some(mentorship_details) = updates.mentorship_details {
            active.mentorship_details = Set(Some(mentorship_details));
        }

        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }
}

pub struct NewMenteeData {
    pub profile_id: Uuid,
    pub mentor_id: Uuid,
    pub adno: String,
    pub class: String,
    pub photo_url: Option<String>,
    pub is_coordinator: bool,
    pub personal_details: Option<Value>,
    pub academic_details: Option<Value>,
    pub mentorship_details: Option<Value>,
}

#[derive(Default)]
pub struct MenteeDataUpdate {
    pub adno: Option<String>,
    pub class: Option<String>,
    pub photo_url: Option<String>,
    pub is_coordinator: Option<bool>,
    pub personal_details: Option<Value>,
    pub academic_details: Option<Value>,
    pub mentorship_details: Option<Value>,
}
