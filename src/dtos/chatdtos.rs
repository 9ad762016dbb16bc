use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::userdtos::UserSummary,
    models::{
        chatmodel::{Chat, Message, MessageType},
        projectmodel::ProjectStatus,
    },
};

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct CreateChatDto {
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct SendMessageDto {
    pub chat_id: Uuid,
    #[validate(length(min = 1, max = 5000, message = "Message content must be 1-5000 characters"))]
    pub content: String,
    #[serde(rename = "type", default)]
    pub message_type: Option<MessageType>,
    pub file_url: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatProject {
    pub id: Uuid,
    pub title: String,
    pub status: ProjectStatus,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatWithDetails {
    #[serde(flatten)]
    pub chat: Chat,
    pub project: ChatProject,
    pub client: UserSummary,
    pub freelancer: UserSummary,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct MessageWithSender {
    #[serde(flatten)]
    pub message: Message,
    pub sender: UserSummary,
}
