//! Direct and group messaging. Group threads are addressed with the
//! synthetic receiver `group-{mentor_id}` so they share the message
//! table with 1:1 threads.

use uuid::Uuid;

use crate::entities::message;
use crate::error::{ServiceError, ServiceResult};
use crate::service::DomainService;

/// Broadcast payload for live message delivery. Subscribers filter by
/// `receiver_id` themselves.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub message: message::Model,
}

pub fn group_address(mentor_id: Uuid) -> String {
    format!("group-{mentor_id}")
}

impl DomainService {
    /// `receiver_id` is either a user id or a group address. The insert
    /// is the source of truth; the broadcast is fire-and-forget and a
    /// send with no subscribers is not an error.
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: String,
        content: String,
    ) -> ServiceResult<message::Model> {
        if content.trim().is_empty() {
            return Err(ServiceError::validation("Message cannot be empty."));
        }

        let created = crate::repositories::MessageRepository::new()
            .create(sender_id, receiver_id, content)
            .await?;

        let _ = self.message_events.send(MessageEvent {
            message: created.clone(),
        });

        Ok(created)
    }

    pub async fn get_messages(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> ServiceResult<Vec<message::Model>> {
        let found = crate::repositories::MessageRepository::new()
            .find_conversation(user_a, user_b)
            .await?;
        Ok(found)
    }

    pub async fn get_group_messages(&self, mentor_id: Uuid) -> ServiceResult<Vec<message::Model>> {
        let found = crate::repositories::MessageRepository::new()
            .find_by_receiver(&group_address(mentor_id))
            .await?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_address_embeds_mentor_id() {
        let id = Uuid::new_v4();
        assert_eq!(group_address(id), format!("group-{id}"));
    }
}
