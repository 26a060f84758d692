//! Domain service facade: the single entry point for views. Mediates
//! between the role-scoped views and the relational store, calling the
//! identity adapter, resolver and media store as needed.

pub mod accounts;
pub mod assignments;
pub mod codes;
pub mod feedback;
pub mod meetings;
pub mod mentees;
pub mod messaging;
pub mod points;
pub mod progress;

pub use assignments::AssignmentView;
pub use meetings::CompletedScheduledMeeting;
pub use mentees::{MenteeUpdate, NewMentee};
pub use messaging::MessageEvent;
pub use progress::NewProgressRecord;

use tokio::sync::broadcast;

use crate::identity::IdentityAdapter;
use crate::media::MediaStore;

pub struct DomainService {
    identity: IdentityAdapter,
    media: MediaStore,
    message_events: broadcast::Sender<MessageEvent>,
}

impl DomainService {
    pub fn new() -> Self {
        let (message_events, _) = broadcast::channel(64);
        Self {
            identity: IdentityAdapter::new(),
            media: MediaStore::new(),
            message_events,
        }
    }

    pub fn identity(&self) -> &IdentityAdapter {
        &self.identity
    }

    /// New-message notifications. Fire-and-forget on the send side;
    /// subscribers filter by receiver themselves.
    pub fn subscribe_messages(&self) -> broadcast::Receiver<MessageEvent> {
        self.message_events.subscribe()
    }
}

impl Default for DomainService {
    fn default() -> Self {
        Self::new()
    }
}
