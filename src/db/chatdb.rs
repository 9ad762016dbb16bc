use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::DBClient;
use crate::models::chatmodel::*;

#[async_trait]
pub trait ChatExt {
    async fn get_chat_by_id(
        &self,
        chat_id: Uuid,
    ) -> Result<Option<Chat>, Error>;

    /// Get-or-create on the (project, client, freelancer) triple. The flag is
    /// true when a new row was inserted.
    async fn create_or_get_chat(
        &self,
        project_id: Uuid,
        client_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<(Chat, bool), Error>;

    /// Chats the user takes part in and has not hidden, most recent first.
    async fn get_user_chats(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Chat>, Error>;

    /// Hides the chat for `side`. Removes the chat and its messages once both
    /// sides have hidden it. `None` when the chat no longer exists.
    async fn hide_chat(
        &self,
        chat_id: Uuid,
        side: ChatSide,
    ) -> Result<Option<HideOutcome>, Error>;

    /// Appends a message, un-hides the chat for the sender's side and bumps
    /// the chat's last activity to the message time. `None` when the chat no
    /// longer exists.
    async fn send_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        side: ChatSide,
        message_type: MessageType,
        content: String,
        file_url: Option<String>,
    ) -> Result<Option<Message>, Error>;

    async fn get_chat_messages(
        &self,
        chat_id: Uuid,
    ) -> Result<Vec<Message>, Error>;

    async fn mark_messages_as_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, Error>;

    async fn get_chat_unread_count(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, Error>;

    async fn get_unread_count(
        &self,
        user_id: Uuid,
    ) -> Result<i64, Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn get_chat_by_id(
        &self,
        chat_id: Uuid,
    ) -> Result<Option<Chat>, Error> {
        sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, project_id, client_id, freelancer_id, client_hidden,
                   freelancer_hidden, created_at, updated_at
            FROM chats
            WHERE id = $1
            "#
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_or_get_chat(
        &self,
        project_id: Uuid,
        client_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<(Chat, bool), Error> {
        let inserted = sqlx::query_as::<_, Chat>(
            r#"
            INSERT INTO chats (project_id, client_id, freelancer_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, client_id, freelancer_id) DO NOTHING
            RETURNING id, project_id, client_id, freelancer_id, client_hidden,
                      freelancer_hidden, created_at, updated_at
            "#
        )
        .bind(project_id)
        .bind(client_id)
        .bind(freelancer_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(chat) = inserted {
            return Ok((chat, true));
        }

        let existing = sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, project_id, client_id, freelancer_id, client_hidden,
                   freelancer_hidden, created_at, updated_at
            FROM chats
            WHERE project_id = $1 AND client_id = $2 AND freelancer_id = $3
            "#
        )
        .bind(project_id)
        .bind(client_id)
        .bind(freelancer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((existing, false))
    }

    async fn get_user_chats(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Chat>, Error> {
        sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, project_id, client_id, freelancer_id, client_hidden,
                   freelancer_hidden, created_at, updated_at
            FROM chats
            WHERE (client_id = $1 AND client_hidden = false)
               OR (freelancer_id = $1 AND freelancer_hidden = false)
            ORDER BY updated_at DESC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn hide_chat(
        &self,
        chat_id: Uuid,
        side: ChatSide,
    ) -> Result<Option<HideOutcome>, Error> {
        let mut tx = self.pool.begin().await?;

        // The row lock taken here serialises two participants hiding at once.
        let chat = sqlx::query_as::<_, Chat>(
            r#"
            UPDATE chats
            SET client_hidden = client_hidden OR $2,
                freelancer_hidden = freelancer_hidden OR $3
            WHERE id = $1
            RETURNING id, project_id, client_id, freelancer_id, client_hidden,
                      freelancer_hidden, created_at, updated_at
            "#
        )
        .bind(chat_id)
        .bind(side == ChatSide::Client)
        .bind(side == ChatSide::Freelancer)
        .fetch_optional(&mut *tx)
        .await?;

        // deleted by the other participant since it was loaded
        let Some(chat) = chat else {
            return Ok(None);
        };

        if !chat.hidden_by_both() {
            tx.commit().await?;
            return Ok(Some(HideOutcome::Hidden));
        }

        sqlx::query("DELETE FROM messages WHERE chat_id = $1")
            .bind(chat_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(chat_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(HideOutcome::Deleted))
    }

    async fn send_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        side: ChatSide,
        message_type: MessageType,
        content: String,
        file_url: Option<String>,
    ) -> Result<Option<Message>, Error> {
        let mut tx = self.pool.begin().await?;

        // Lock the chat so a concurrent hard delete either finishes first or
        // waits for this message.
        let locked = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM chats WHERE id = $1 FOR UPDATE"
        )
        .bind(chat_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Ok(None);
        }

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (chat_id, sender_id, content, message_type, file_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, chat_id, sender_id, content, message_type, file_url,
                      read_at, created_at
            "#
        )
        .bind(chat_id)
        .bind(sender_id)
        .bind(content)
        .bind(message_type)
        .bind(file_url)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE chats
            SET client_hidden = client_hidden AND NOT $2,
                freelancer_hidden = freelancer_hidden AND NOT $3,
                updated_at = $4
            WHERE id = $1
            "#
        )
        .bind(chat_id)
        .bind(side == ChatSide::Client)
        .bind(side == ChatSide::Freelancer)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(message))
    }

    async fn get_chat_messages(
        &self,
        chat_id: Uuid,
    ) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, chat_id, sender_id, content, message_type, file_url,
                   read_at, created_at
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at ASC
            "#
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_messages_as_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = NOW()
            WHERE chat_id = $1
              AND sender_id != $2
              AND read_at IS NULL
            "#
        )
        .bind(chat_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn get_chat_unread_count(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE chat_id = $1
              AND sender_id != $2
              AND read_at IS NULL
            "#
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_unread_count(
        &self,
        user_id: Uuid,
    ) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages m
            INNER JOIN chats c ON m.chat_id = c.id
            WHERE ((c.client_id = $1 AND c.client_hidden = false)
                OR (c.freelancer_id = $1 AND c.freelancer_hidden = false))
              AND m.sender_id != $1
              AND m.read_at IS NULL
            "#
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
