//! Buyer/seller messaging entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ConversationId, MessageId, UserId};

/// A conversation between two marketplace users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Conversation ID.
    pub id: ConversationId,
    /// Users allowed to read and post in this conversation.
    pub participants: Vec<UserId>,
    /// Subject line, usually the product title being discussed.
    pub subject: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Returns true if the user may read and post in this conversation.
    #[must_use]
    pub fn has_participant(&self, user_id: &UserId) -> bool {
        self.participants.contains(user_id)
    }
}

/// A single message within a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID.
    pub id: MessageId,
    /// Conversation this message belongs to.
    pub conversation_id: ConversationId,
    /// Author, always one of the conversation participants.
    pub sender_id: UserId,
    /// Message text.
    pub body: String,
    /// Send time.
    pub sent_at: DateTime<Utc>,
}
