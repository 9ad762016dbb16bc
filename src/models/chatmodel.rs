use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "message_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    File,
    Image,
    System,
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Text
    }
}

/// Which participant of a chat a user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSide {
    Client,
    Freelancer,
}

#[derive(Debug, Serialize, Clone, Deserialize, sqlx::FromRow)]
pub struct Chat {
    pub id: Uuid,
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    pub client_hidden: bool,
    pub freelancer_hidden: bool,
    pub created_at: DateTime<Utc>,
    /// Last activity; bumped to the creation time of each new message.
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn side_of(&self, user_id: Uuid) -> Option<ChatSide> {
        if self.client_id == user_id {
            Some(ChatSide::Client)
        } else if self.freelancer_id == user_id {
            Some(ChatSide::Freelancer)
        } else {
            None
        }
    }

    pub fn is_hidden_for(&self, side: ChatSide) -> bool {
        match side {
            ChatSide::Client => self.client_hidden,
            ChatSide::Freelancer => self.freelancer_hidden,
        }
    }

    pub fn set_hidden(&mut self, side: ChatSide, hidden: bool) {
        match side {
            ChatSide::Client => self.client_hidden = hidden,
            ChatSide::Freelancer => self.freelancer_hidden = hidden,
        }
    }

    pub fn hidden_by_both(&self) -> bool {
        self.client_hidden && self.freelancer_hidden
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub message_type: MessageType,
    pub file_url: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Result of hiding a chat for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOutcome {
    Hidden,
    /// Both sides had hidden it; the chat and its messages are gone.
    Deleted,
}
