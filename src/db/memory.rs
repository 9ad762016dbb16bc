//! In-memory store used by the service tests. Mirrors the SQL semantics of
//! `DBClient` closely enough for the domain rules to be exercised without a
//! database.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{chatdb::ChatExt, projectdb::{BidExt, ProjectExt}, userdb::UserExt};
use crate::models::{chatmodel::*, projectmodel::*, usermodel::*};

#[derive(Default)]
struct State {
    ticks: i64,
    users: Vec<User>,
    projects: Vec<Project>,
    bids: Vec<Bid>,
    chats: Vec<Chat>,
    messages: Vec<Message>,
    vanishing_chat: Option<Uuid>,
}

impl State {
    /// Plays out a hard delete that another participant committed between
    /// the caller's read and its write.
    fn settle_vanishing_chat(&mut self) {
        if let Some(chat_id) = self.vanishing_chat.take() {
            self.messages.retain(|m| m.chat_id != chat_id);
            self.chats.retain(|c| c.id != chat_id);
        }
    }

    /// Strictly increasing timestamps so ordering is deterministic.
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Utc.timestamp_millis_opt(1_700_000_000_000 + self.ticks).unwrap()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next chat write finds `chat_id` already deleted.
    pub async fn delete_chat_before_next_write(&self, chat_id: Uuid) {
        self.state.lock().await.vanishing_chat = Some(chat_id);
    }

    pub async fn message_count(&self, chat_id: Uuid) -> usize {
        let state = self.state.lock().await;
        state.messages.iter().filter(|m| m.chat_id == chat_id).count()
    }
}

#[async_trait]
impl UserExt for MemoryStore {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error> {
        let state = self.state.lock().await;
        let user = if let Some(user_id) = user_id {
            state.users.iter().find(|u| u.id == user_id)
        } else if let Some(email) = email {
            state.users.iter().find(|u| u.email == email)
        } else {
            None
        };
        Ok(user.cloned())
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        email: T,
        password: T,
        name: T,
        role: UserRole,
    ) -> Result<User, Error> {
        let mut state = self.state.lock().await;
        let now = state.now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.into(),
            password: password.into(),
            name: name.into(),
            avatar: None,
            bio: None,
            skills: None,
            role,
            rating: 0.0,
            completed_projects: 0,
            profession: None,
            experience: None,
            portfolio: None,
            hourly_rate: None,
            available: true,
            city: None,
            website: None,
            linkedin: None,
            github: None,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let mut state = self.state.lock().await;
        let now = state.now();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(Error::RowNotFound)?;
        update.apply_to(user);
        user.updated_at = now;
        Ok(user.clone())
    }
}

#[async_trait]
impl ProjectExt for MemoryStore {
    async fn get_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<Project>, Error> {
        let state = self.state.lock().await;
        let mut projects: Vec<Project> = state
            .projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn get_project_by_id(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Project>, Error> {
        let state = self.state.lock().await;
        Ok(state.projects.iter().find(|p| p.id == project_id).cloned())
    }

    async fn save_project(
        &self,
        client_id: Uuid,
        draft: ProjectDraft,
    ) -> Result<Project, Error> {
        let mut state = self.state.lock().await;
        let now = state.now();
        let project = Project {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            budget_min: draft.budget_min,
            budget_max: draft.budget_max,
            currency: "TWD".to_string(),
            category: draft.category,
            location: draft.location,
            skills: draft.skills,
            requirements: draft.requirements,
            urgency: draft.urgency,
            status: ProjectStatus::Open,
            client_id,
            freelancer_id: None,
            deadline: draft.deadline,
            created_at: now,
            updated_at: now,
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        project_id: Uuid,
        draft: ProjectDraft,
    ) -> Result<Project, Error> {
        let mut state = self.state.lock().await;
        let now = state.now();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(Error::RowNotFound)?;
        project.title = draft.title;
        project.description = draft.description;
        project.budget_min = draft.budget_min;
        project.budget_max = draft.budget_max;
        project.category = draft.category;
        project.location = draft.location;
        project.skills = draft.skills;
        project.requirements = draft.requirements;
        project.urgency = draft.urgency;
        project.deadline = draft.deadline;
        project.updated_at = now;
        Ok(project.clone())
    }

    async fn update_project_status(
        &self,
        project_id: Uuid,
        status: ProjectStatus,
    ) -> Result<Project, Error> {
        let mut state = self.state.lock().await;
        let now = state.now();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(Error::RowNotFound)?;
        project.status = status;
        project.updated_at = now;
        Ok(project.clone())
    }

    async fn archive_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
        notice: &str,
    ) -> Result<(Project, u64), Error> {
        let mut state = self.state.lock().await;
        let chat_ids: Vec<Uuid> = state
            .chats
            .iter()
            .filter(|c| c.project_id == project_id)
            .map(|c| c.id)
            .collect();

        for chat_id in &chat_ids {
            let now = state.now();
            state.messages.push(Message {
                id: Uuid::new_v4(),
                chat_id: *chat_id,
                sender_id: owner_id,
                content: notice.to_string(),
                message_type: MessageType::System,
                file_url: None,
                read_at: None,
                created_at: now,
            });
        }

        let now = state.now();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(Error::RowNotFound)?;
        project.status = ProjectStatus::Deleted;
        project.updated_at = now;
        Ok((project.clone(), chat_ids.len() as u64))
    }
}

#[async_trait]
impl BidExt for MemoryStore {
    async fn get_bid(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Option<Bid>, Error> {
        let state = self.state.lock().await;
        Ok(state
            .bids
            .iter()
            .find(|b| b.project_id == project_id && b.freelancer_id == freelancer_id)
            .cloned())
    }

    async fn save_bid(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
        amount: i32,
        proposal: String,
        timeline: String,
    ) -> Result<Bid, Error> {
        let mut state = self.state.lock().await;
        let now = state.now();
        let bid = Bid {
            id: Uuid::new_v4(),
            project_id,
            freelancer_id,
            amount,
            proposal,
            timeline,
            status: BidStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state.bids.push(bid.clone());
        Ok(bid)
    }

    async fn get_project_bids(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<Bid>, Error> {
        let state = self.state.lock().await;
        let mut bids: Vec<Bid> = state
            .bids
            .iter()
            .filter(|b| b.project_id == project_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bids)
    }

    async fn get_bid_count(
        &self,
        project_id: Uuid,
    ) -> Result<i64, Error> {
        let state = self.state.lock().await;
        Ok(state.bids.iter().filter(|b| b.project_id == project_id).count() as i64)
    }
}

fn visible_to(chat: &Chat, user_id: Uuid) -> bool {
    chat.side_of(user_id)
        .map_or(false, |side| !chat.is_hidden_for(side))
}

#[async_trait]
impl ChatExt for MemoryStore {
    async fn get_chat_by_id(
        &self,
        chat_id: Uuid,
    ) -> Result<Option<Chat>, Error> {
        let state = self.state.lock().await;
        Ok(state.chats.iter().find(|c| c.id == chat_id).cloned())
    }

    async fn create_or_get_chat(
        &self,
        project_id: Uuid,
        client_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<(Chat, bool), Error> {
        let mut state = self.state.lock().await;
        if let Some(chat) = state.chats.iter().find(|c| {
            c.project_id == project_id && c.client_id == client_id && c.freelancer_id == freelancer_id
        }) {
            return Ok((chat.clone(), false));
        }

        let now = state.now();
        let chat = Chat {
            id: Uuid::new_v4(),
            project_id,
            client_id,
            freelancer_id,
            client_hidden: false,
            freelancer_hidden: false,
            created_at: now,
            updated_at: now,
        };
        state.chats.push(chat.clone());
        Ok((chat, true))
    }

    async fn get_user_chats(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Chat>, Error> {
        let state = self.state.lock().await;
        let mut chats: Vec<Chat> = state
            .chats
            .iter()
            .filter(|c| visible_to(c, user_id))
            .cloned()
            .collect();
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(chats)
    }

    async fn hide_chat(
        &self,
        chat_id: Uuid,
        side: ChatSide,
    ) -> Result<Option<HideOutcome>, Error> {
        let mut state = self.state.lock().await;
        state.settle_vanishing_chat();

        let Some(chat) = state.chats.iter_mut().find(|c| c.id == chat_id) else {
            return Ok(None);
        };
        chat.set_hidden(side, true);

        if !chat.hidden_by_both() {
            return Ok(Some(HideOutcome::Hidden));
        }

        state.messages.retain(|m| m.chat_id != chat_id);
        state.chats.retain(|c| c.id != chat_id);
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
        let mut state = self.state.lock().await;
        state.settle_vanishing_chat();

        let now = state.now();
        let Some(chat) = state.chats.iter_mut().find(|c| c.id == chat_id) else {
            return Ok(None);
        };
        chat.set_hidden(side, false);
        chat.updated_at = now;

        let message = Message {
            id: Uuid::new_v4(),
            chat_id,
            sender_id,
            content,
            message_type,
            file_url,
            read_at: None,
            created_at: now,
        };
        state.messages.push(message.clone());
        Ok(Some(message))
    }

    async fn get_chat_messages(
        &self,
        chat_id: Uuid,
    ) -> Result<Vec<Message>, Error> {
        let state = self.state.lock().await;
        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn mark_messages_as_read(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, Error> {
        let mut state = self.state.lock().await;
        let now = state.now();
        let mut updated = 0;
        for message in state.messages.iter_mut() {
            if message.chat_id == chat_id && message.sender_id != user_id && message.read_at.is_none() {
                message.read_at = Some(now);
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn get_chat_unread_count(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, Error> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id && m.sender_id != user_id && m.read_at.is_none())
            .count() as i64)
    }

    async fn get_unread_count(
        &self,
        user_id: Uuid,
    ) -> Result<i64, Error> {
        let state = self.state.lock().await;
        let visible: Vec<Uuid> = state
            .chats
            .iter()
            .filter(|c| visible_to(c, user_id))
            .map(|c| c.id)
            .collect();
        Ok(state
            .messages
            .iter()
            .filter(|m| visible.contains(&m.chat_id) && m.sender_id != user_id && m.read_at.is_none())
            .count() as i64)
    }
}
