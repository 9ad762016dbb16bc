use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{chatdb::ChatExt, projectdb::ProjectExt, userdb::UserExt},
    dtos::{
        chatdtos::{ChatProject, ChatWithDetails, CreateChatDto, MessageWithSender, SendMessageDto},
        userdtos::UserSummary,
    },
    models::{
        chatmodel::{Chat, ChatSide, HideOutcome, MessageType},
        usermodel::{User, UserRole},
    },
    service::error::ServiceError,
};

#[derive(Debug)]
pub struct ChatService<S> {
    db_client: Arc<S>,
}

impl<S> ChatService<S>
where
    S: UserExt + ProjectExt + ChatExt + Send + Sync,
{
    pub fn new(db_client: Arc<S>) -> Self {
        Self { db_client }
    }

    async fn user_summary(&self, user_id: Uuid) -> Result<UserSummary, ServiceError> {
        let user = self
            .db_client
            .get_user(Some(user_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;
        Ok(UserSummary::from(&user))
    }

    /// Loads a chat and resolves which side the caller is on.
    async fn participant_chat(
        &self,
        caller: &User,
        chat_id: Uuid,
    ) -> Result<(Chat, ChatSide), ServiceError> {
        let chat = self
            .db_client
            .get_chat_by_id(chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))?;

        let side = chat
            .side_of(caller.id)
            .ok_or_else(|| ServiceError::forbidden("You don't have access to this chat"))?;

        Ok((chat, side))
    }

    async fn chat_details(&self, chat: Chat, viewer_id: Uuid) -> Result<ChatWithDetails, ServiceError> {
        let project = self
            .db_client
            .get_project_by_id(chat.project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(chat.project_id))?;
        let client = self.user_summary(chat.client_id).await?;
        let freelancer = self.user_summary(chat.freelancer_id).await?;
        let unread_count = self
            .db_client
            .get_chat_unread_count(chat.id, viewer_id)
            .await?;

        Ok(ChatWithDetails {
            chat,
            project: ChatProject {
                id: project.id,
                title: project.title,
                status: project.status,
            },
            client,
            freelancer,
            unread_count,
        })
    }

    /// Get-or-create the chat between the calling client and a freelancer on
    /// one of the caller's projects. The flag is true for a new chat.
    pub async fn open_chat(
        &self,
        caller: &User,
        body: CreateChatDto,
    ) -> Result<(ChatWithDetails, bool), ServiceError> {
        match caller.role {
            UserRole::Client => {}
            UserRole::Freelancer => {
                return Err(ServiceError::forbidden("Only clients can create chats"));
            }
        }

        let project = self
            .db_client
            .get_project_by_id(body.project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(body.project_id))?;

        if project.client_id != caller.id {
            return Err(ServiceError::forbidden(
                "You can only create chats for your own projects",
            ));
        }
        if project.is_deleted() {
            return Err(ServiceError::ProjectDeleted(project.id));
        }

        let freelancer = self
            .db_client
            .get_user(Some(body.freelancer_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(body.freelancer_id))?;

        match freelancer.role {
            UserRole::Freelancer => {}
            UserRole::Client => {
                return Err(ServiceError::validation("Selected user is not a freelancer"));
            }
        }

        let (chat, created) = self
            .db_client
            .create_or_get_chat(project.id, caller.id, freelancer.id)
            .await?;

        if created {
            tracing::info!(
                "chat {} opened on project {} between {} and {}",
                chat.id,
                project.id,
                caller.id,
                freelancer.id
            );
        }

        let details = self.chat_details(chat, caller.id).await?;
        Ok((details, created))
    }

    pub async fn list_chats(&self, caller: &User) -> Result<Vec<ChatWithDetails>, ServiceError> {
        let chats = self.db_client.get_user_chats(caller.id).await?;

        let mut details = Vec::with_capacity(chats.len());
        for chat in chats {
            details.push(self.chat_details(chat, caller.id).await?);
        }

        Ok(details)
    }

    /// Hides the chat for the caller only. Once both participants have hidden
    /// it the chat and its history are removed for good.
    pub async fn hide_chat(&self, caller: &User, chat_id: Uuid) -> Result<HideOutcome, ServiceError> {
        let (chat, side) = self.participant_chat(caller, chat_id).await?;

        let outcome = self
            .db_client
            .hide_chat(chat.id, side)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))?;

        match outcome {
            HideOutcome::Hidden => tracing::debug!("chat {} hidden by {}", chat.id, caller.id),
            HideOutcome::Deleted => tracing::info!("chat {} hidden by both sides, deleted", chat.id),
        }

        Ok(outcome)
    }

    /// Appends a message. A sender who had hidden the chat gets it back; the
    /// other side's visibility is left alone.
    pub async fn send_message(
        &self,
        caller: &User,
        body: SendMessageDto,
    ) -> Result<MessageWithSender, ServiceError> {
        if body.content.trim().is_empty() {
            return Err(ServiceError::validation("Message content is required"));
        }

        let message_type = body.message_type.unwrap_or_default();
        if message_type == MessageType::System {
            return Err(ServiceError::validation("System messages cannot be sent by users"));
        }

        let (chat, side) = self.participant_chat(caller, body.chat_id).await?;

        let message = self
            .db_client
            .send_message(chat.id, caller.id, side, message_type, body.content, body.file_url)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat.id))?;

        Ok(MessageWithSender {
            message,
            sender: UserSummary::from(caller),
        })
    }

    /// Full history, oldest first. A chat the caller has hidden reads as
    /// missing.
    pub async fn list_messages(
        &self,
        caller: &User,
        chat_id: Uuid,
    ) -> Result<Vec<MessageWithSender>, ServiceError> {
        let (chat, side) = self.participant_chat(caller, chat_id).await?;

        if chat.is_hidden_for(side) {
            return Err(ServiceError::ChatNotFound(chat_id));
        }

        let client = self.user_summary(chat.client_id).await?;
        let freelancer = self.user_summary(chat.freelancer_id).await?;

        let messages = self.db_client.get_chat_messages(chat.id).await?;

        let mut result = Vec::with_capacity(messages.len());
        for message in messages {
            let sender = match chat.side_of(message.sender_id) {
                Some(ChatSide::Client) => client.clone(),
                Some(ChatSide::Freelancer) => freelancer.clone(),
                None => self.user_summary(message.sender_id).await?,
            };
            result.push(MessageWithSender { message, sender });
        }

        Ok(result)
    }

    /// Marks every unread message from the other participant as read.
    /// Returns how many changed.
    pub async fn mark_read(&self, caller: &User, chat_id: Uuid) -> Result<u64, ServiceError> {
        let (chat, _) = self.participant_chat(caller, chat_id).await?;

        Ok(self.db_client.mark_messages_as_read(chat.id, caller.id).await?)
    }

    pub async fn unread_count(&self, caller: &User) -> Result<i64, ServiceError> {
        Ok(self.db_client.get_unread_count(caller.id).await?)
    }
}
