use crate::entities::invitation_code;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub struct InvitationCodeRepository;

impl InvitationCodeRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Case-sensitive exact match.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<invitation_code::Model>> {
        let db = self.get_connection();
        let found = invitation_code::Entity::find()
            .filter(invitation_code::Column::Code.eq(code))
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn find_all(&self) -> Result<Vec<invitation_code::Model>> {
        let db = self.get_connection();
        let found = invitation_code::Entity::find()
            .order_by_desc(invitation_code::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn create(&self, code: String) -> Result<invitation_code::Model> {
        let db = self.get_connection();
        let model = invitation_code::ActiveModel {
            code: Set(code),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn set_active(&self, code: &str, is_active: bool) -> Result<invitation_code::Model> {
        let row = self
            .find_by_code(code)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Invitation code not found"))?;
        let db = self.get_connection();

        let mut active: invitation_code::ActiveModel = row.into();
        active.is_active = Set(is_active);

        let result = active.update(db).await?;
        Ok(result)
    }
}
