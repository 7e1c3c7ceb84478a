// In-memory stand-in for DBClient used by service tests.
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Error;
use uuid::Uuid;

use super::{chatdb::ChatExt, ticketdb::TicketExt, userdb::UserExt};
use crate::models::{
    chatmodels::ChatThread,
    ticketmodel::*,
    usermodel::{User, UserProfileUpdate, UserRole},
};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    tickets: Vec<Ticket>,
    chats: Vec<ChatThread>,
    chat_writes: usize,
}

#[derive(Debug, Default)]
pub struct MemoryDb {
    state: Mutex<State>,
    fail_agent_lookup: bool,
}

impl MemoryDb {
    pub fn new() -> Self {
        MemoryDb::default()
    }

    /// A store whose agent query always errors.
    pub fn with_failing_agent_lookup() -> Self {
        MemoryDb {
            fail_agent_lookup: true,
            ..MemoryDb::default()
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_user(&self, fullname: &str, role: UserRole) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            fullname: fullname.to_string(),
            email: format!("{}@desk.test", fullname.to_lowercase().replace(' ', ".")),
            password: String::new(),
            bio: String::new(),
            role,
            avatar_url: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.state().users.push(user.clone());
        user
    }

    pub fn add_ticket(&self, title: &str) -> Ticket {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "printer on fire".to_string(),
            priority: TicketPriority::High,
            user_email: "al@desk.test".to_string(),
            user_name: "Al".to_string(),
            user_id: Uuid::new_v4(),
            assigned_agent_id: None,
            assigned_agent_name: String::new(),
            status: TicketStatus::Open,
            created_at: now,
            updated_at: now,
        };
        self.state().tickets.push(ticket.clone());
        ticket
    }

    pub fn chat_count(&self) -> usize {
        self.state().chats.len()
    }

    pub fn chat_writes(&self) -> usize {
        self.state().chat_writes
    }

    pub fn stored_chat(&self, ticket_id: Uuid) -> Option<ChatThread> {
        self.state()
            .chats
            .iter()
            .find(|c| c.ticket_id == ticket_id)
            .cloned()
    }
}

fn matches_filter(ticket: &Ticket, filter: &TicketFilter) -> bool {
    filter.status.map_or(true, |s| ticket.status == s)
        && filter.priority.map_or(true, |p| ticket.priority == p)
        && filter.user_email.as_ref().map_or(true, |e| {
            ticket.user_email.to_lowercase().contains(&e.to_lowercase())
        })
        && filter.user_id.map_or(true, |id| ticket.user_id == id)
        && filter
            .assigned_agent_id
            .map_or(true, |id| ticket.assigned_agent_id == Some(id))
}

#[async_trait]
impl UserExt for MemoryDb {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error> {
        let state = self.state();
        let user = match (user_id, email) {
            (Some(id), _) => state.users.iter().find(|u| u.id == id),
            (None, Some(email)) => {
                let email = email.trim().to_lowercase();
                state.users.iter().find(|u| u.email == email)
            }
            (None, None) => None,
        };
        Ok(user.cloned())
    }

    async fn get_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.state().users.clone())
    }

    async fn get_agents(&self) -> Result<Vec<User>, Error> {
        if self.fail_agent_lookup {
            return Err(Error::PoolTimedOut);
        }
        Ok(self
            .state()
            .users
            .iter()
            .filter(|u| u.role == UserRole::Agent)
            .cloned()
            .collect())
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        fullname: T,
        email: T,
        password: T,
        bio: T,
        role: UserRole,
        avatar_url: T,
    ) -> Result<User, Error> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            fullname: fullname.into(),
            email: email.into().trim().to_lowercase(),
            password: password.into(),
            bio: bio.into(),
            role,
            avatar_url: avatar_url.into(),
            created_at: now,
            updated_at: now,
        };
        self.state().users.push(user.clone());
        Ok(user)
    }

    async fn update_user_profile(
        &self,
        email: &str,
        update: UserProfileUpdate,
    ) -> Result<Option<User>, Error> {
        let email = email.trim().to_lowercase();
        let mut state = self.state();
        let Some(user) = state.users.iter_mut().find(|u| u.email == email) else {
            return Ok(None);
        };
        if let Some(fullname) = update.fullname {
            user.fullname = fullname;
        }
        if let Some(bio) = update.bio {
            user.bio = bio;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(avatar_url) = update.avatar_url {
            user.avatar_url = avatar_url;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, email: &str) -> Result<Option<User>, Error> {
        let email = email.trim().to_lowercase();
        let mut state = self.state();
        let position = state.users.iter().position(|u| u.email == email);
        Ok(position.map(|i| state.users.remove(i)))
    }
}

#[async_trait]
impl TicketExt for MemoryDb {
    async fn save_ticket(&self, ticket: NewTicket) -> Result<Ticket, Error> {
        let now = Utc::now();
        let (assigned_agent_id, assigned_agent_name) = match ticket.assigned_agent {
            Some(agent) => (Some(agent.agent_id), agent.agent_name),
            None => (None, String::new()),
        };
        let saved = Ticket {
            id: Uuid::new_v4(),
            title: ticket.title,
            description: ticket.description,
            priority: ticket.priority,
            user_email: ticket.user_email,
            user_name: ticket.user_name,
            user_id: ticket.user_id,
            assigned_agent_id,
            assigned_agent_name,
            status: TicketStatus::Open,
            created_at: now,
            updated_at: now,
        };
        self.state().tickets.push(saved.clone());
        Ok(saved)
    }

    async fn get_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, Error> {
        Ok(self
            .state()
            .tickets
            .iter()
            .find(|t| t.id == ticket_id)
            .cloned())
    }

    async fn get_tickets(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Ticket>, Error> {
        let state = self.state();
        let mut tickets: Vec<Ticket> = state
            .tickets
            .iter()
            .filter(|t| matches_filter(t, filter))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn get_ticket_count(&self, filter: &TicketFilter) -> Result<i64, Error> {
        let state = self.state();
        Ok(state.tickets.iter().filter(|t| matches_filter(t, filter)).count() as i64)
    }

    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        update: TicketUpdate,
    ) -> Result<Option<Ticket>, Error> {
        let mut state = self.state();
        let Some(ticket) = state.tickets.iter_mut().find(|t| t.id == ticket_id) else {
            return Ok(None);
        };
        if let Some(title) = update.title {
            ticket.title = title;
        }
        if let Some(description) = update.description {
            ticket.description = description;
        }
        if let Some(priority) = update.priority {
            ticket.priority = priority;
        }
        if let Some(user_email) = update.user_email {
            ticket.user_email = user_email;
        }
        if let Some(user_name) = update.user_name {
            ticket.user_name = user_name;
        }
        if let Some(user_id) = update.user_id {
            ticket.user_id = user_id;
        }
        if let Some(agent_id) = update.assigned_agent_id {
            ticket.assigned_agent_id = Some(agent_id);
        }
        if let Some(agent_name) = update.assigned_agent_name {
            ticket.assigned_agent_name = agent_name;
        }
        if let Some(status) = update.status {
            ticket.status = status;
        }
        ticket.updated_at = Utc::now();
        Ok(Some(ticket.clone()))
    }

    async fn delete_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, Error> {
        let mut state = self.state();
        let Some(position) = state.tickets.iter().position(|t| t.id == ticket_id) else {
            return Ok(None);
        };
        state.chats.retain(|c| c.ticket_id != ticket_id);
        Ok(Some(state.tickets.remove(position)))
    }
}

#[async_trait]
impl ChatExt for MemoryDb {
    async fn get_chat_by_ticket(&self, ticket_id: Uuid) -> Result<Option<ChatThread>, Error> {
        Ok(self.stored_chat(ticket_id))
    }

    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<ChatThread>, Error> {
        Ok(self.state().chats.iter().find(|c| c.id == chat_id).cloned())
    }

    async fn create_or_get_chat(&self, ticket_id: Uuid) -> Result<ChatThread, Error> {
        let mut state = self.state();
        if let Some(chat) = state.chats.iter().find(|c| c.ticket_id == ticket_id) {
            return Ok(chat.clone());
        }
        let chat = ChatThread::new(ticket_id, Utc::now());
        state.chats.push(chat.clone());
        state.chat_writes += 1;
        Ok(chat)
    }

    async fn save_chat(&self, chat: &ChatThread) -> Result<ChatThread, Error> {
        let mut state = self.state();
        state.chat_writes += 1;
        let mut saved = chat.clone();
        saved.updated_at = Utc::now();
        match state.chats.iter_mut().find(|c| c.ticket_id == chat.ticket_id) {
            Some(existing) => {
                existing.messages = saved.messages;
                existing.last_updated = saved.last_updated;
                existing.updated_at = saved.updated_at;
                Ok(existing.clone())
            }
            None => {
                state.chats.push(saved.clone());
                Ok(saved)
            }
        }
    }
}
