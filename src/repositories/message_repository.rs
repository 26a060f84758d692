use crate::entities::message;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub struct MessageRepository;

impl MessageRepository {
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
        sender_id: Uuid,
        receiver_id: String,
        content: String,
    ) -> Result<message::Model> {
        let db = self.get_connection();
        let model = message::ActiveModel {
            id: Set(Uuid::new_v4()),
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            content: Set(content),
            timestamp: Set(chrono::Utc::now().naive_utc()),
        };
        let result = model.insert(db).await?;
        Ok(result)
    }

    /// Both directions of a 1:1 thread, oldest first for display.
    pub async fn find_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Vec<message::Model>> {
        let db = self.get_connection();
        let found = message::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(user_a))
                            .add(message::Column::ReceiverId.eq(user_b.to_string())),
                    )
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(user_b))
                            .add(message::Column::ReceiverId.eq(user_a.to_string())),
                    ),
            )
            .order_by_asc(message::Column::Timestamp)
            .all(db)
            .await?;
        Ok(found)
    }

    /// Group threads are addressed to the synthetic `group-{mentorId}`
    /// receiver.
    pub async fn find_by_receiver(&self, receiver_id: &str) -> Result<Vec<message::Model>> {
        let db = self.get_connection();
        let found = message::Entity::find()
            .filter(message::Column::ReceiverId.eq(receiver_id))
            .order_by_asc(message::Column::Timestamp)
            .all(db)
            .await?;
        Ok(found)
    }
}
