use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storepilot_core::EntityId;

/// Chat message identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub EntityId);

impl MessageId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for MessageId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the conversation log.
///
/// Messages are immutable once appended; the log only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    /// Tappable follow-ups rendered under assistant messages.
    pub suggestions: Vec<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(EntityId::new()),
            role: Role::User,
            content: content.into(),
            sent_at: Utc::now(),
            suggestions: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            id: MessageId::new(EntityId::new()),
            role: Role::Assistant,
            content: content.into(),
            sent_at: Utc::now(),
            suggestions,
        }
    }
}
