// models/chatmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::usermodel::UserRole;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_role: UserRole,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageSender {
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_role: UserRole,
}

/// The chat document of a single ticket. Messages are kept in insertion
/// order and addressed by their stable id.
#[derive(Debug, Serialize, Clone, Deserialize, sqlx::FromRow)]
pub struct ChatThread {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub messages: Json<Vec<ChatMessage>>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatThread {
    pub fn new(ticket_id: Uuid, now: DateTime<Utc>) -> Self {
        ChatThread {
            id: Uuid::new_v4(),
            ticket_id,
            messages: Json(Vec::new()),
            last_updated: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push_message(
        &mut self,
        sender: MessageSender,
        body: &str,
        now: DateTime<Utc>,
    ) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            sender_id: sender.sender_id,
            sender_name: sender.sender_name,
            sender_role: sender.sender_role,
            body: body.trim().to_string(),
            timestamp: now,
            edited: false,
            edited_at: None,
        };

        self.messages.push(message.clone());
        self.last_updated = now;
        message
    }

    pub fn position_of(&self, message_id: Uuid) -> Option<usize> {
        self.messages.iter().position(|m| m.id == message_id)
    }

    pub fn message_at(&self, index: usize) -> Option<&ChatMessage> {
        self.messages.get(index)
    }

    /// Replaces the body of the message at `index`. Sender and timestamp are left alone.
    pub fn edit_message(
        &mut self,
        index: usize,
        body: &str,
        now: DateTime<Utc>,
    ) -> Option<ChatMessage> {
        let message = self.messages.get_mut(index)?;
        message.body = body.trim().to_string();
        message.edited = true;
        message.edited_at = Some(now);

        let updated = message.clone();
        self.last_updated = now;
        Some(updated)
    }

    pub fn remove_message(&mut self, index: usize, now: DateTime<Utc>) -> Option<ChatMessage> {
        if index >= self.messages.len() {
            return None;
        }

        let removed = self.messages.remove(index);
        self.last_updated = now;
        Some(removed)
    }

    /// Messages strictly newer than `since`, or all of them when `since` is `None`.
    pub fn messages_since(&self, since: Option<DateTime<Utc>>) -> Vec<ChatMessage> {
        match since {
            Some(since) => self
                .messages
                .iter()
                .filter(|m| m.timestamp > since)
                .cloned()
                .collect(),
            None => self.messages.to_vec(),
        }
    }
}
