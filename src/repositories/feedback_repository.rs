use crate::entities::feedback;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct FeedbackRepository;

impl FeedbackRepository {
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
        user_id: Uuid,
        user_role: RoleEnum,
        user_name: String,
        content: String,
    ) -> Result<feedback::Model> {
        let db = self.get_connection();
        let model = feedback::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            user_role: Set(user_role),
            user_name: Set(user_name),
            content: Set(content),
            created_at: Set(chrono::Utc::now().naive_utc()),
            is_actioned: Set(false),
        };
        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn find_all(&self) -> Result<Vec<feedback::Model>> {
        let db = self.get_connection();
        let found = feedback::Entity::find()
            .order_by_desc(feedback::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn set_actioned(&self, id: Uuid, is_actioned: bool) -> Result<feedback::Model> {
        let db = self.get_connection();
        let row = feedback::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Feedback not found"))?;

        let mut active: feedback::ActiveModel = row.into();
        active.is_actioned = Set(is_actioned);

        let result = active.update(db).await?;
        Ok(result)
    }
}
