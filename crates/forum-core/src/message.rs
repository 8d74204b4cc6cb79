//! Direct messages between users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MessageId, UserId};

/// A private message, stored in the recipient's inbox. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    /// Engine-assigned id.
    pub id: MessageId,

    /// Sender.
    pub from_user_id: UserId,

    /// Recipient; the inbox this message lives in.
    pub to_user_id: UserId,

    /// Message body.
    pub content: String,

    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

impl DirectMessage {
    /// Create a message sent now.
    #[must_use]
    pub fn new(
        id: MessageId,
        from_user_id: UserId,
        to_user_id: UserId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            from_user_id,
            to_user_id,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
