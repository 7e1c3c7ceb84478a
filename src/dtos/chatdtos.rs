use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::non_empty;
use crate::models::{
    chatmodels::{ChatMessage, ChatThread, MessageSender},
    usermodel::UserRole,
};

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageDto {
    pub sender_id: Option<String>,
    pub sender_name: Option<String>,
    pub sender_role: Option<String>,
    pub message: Option<String>,
}

impl SendMessageDto {
    /// Splits the request into the sender and the trimmed body.
    pub fn into_parts(self) -> Result<(MessageSender, String), String> {
        let (Some(sender_id), Some(sender_name), Some(sender_role), Some(body)) = (
            non_empty(self.sender_id),
            non_empty(self.sender_name),
            non_empty(self.sender_role),
            non_empty(self.message),
        ) else {
            return Err("senderId, senderName, senderRole, and message are required".to_string());
        };

        let sender_role = sender_role
            .parse::<UserRole>()
            .map_err(|e| format!("senderRole {}", e))?;
        let sender_id = Uuid::parse_str(&sender_id)
            .map_err(|_| "senderId must be a valid user id".to_string())?;

        Ok((
            MessageSender {
                sender_id,
                sender_name,
                sender_role,
            },
            body,
        ))
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageDto {
    pub message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessagesQueryDto {
    pub last_seen_timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatThreadResponseDto {
    pub status: String,
    pub chat_id: Uuid,
    pub ticket_id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatThreadResponseDto {
    pub fn from_thread(thread: ChatThread) -> Self {
        ChatThreadResponseDto {
            status: "success".to_string(),
            chat_id: thread.id,
            ticket_id: thread.ticket_id,
            messages: thread.messages.0,
            last_updated: thread.last_updated,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSentResponseDto {
    pub status: String,
    pub message: ChatMessage,
    pub chat_id: Uuid,
    pub ticket_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessagesResponseDto {
    pub status: String,
    pub chat_id: Uuid,
    pub ticket_id: Uuid,
    pub new_messages: Vec<ChatMessage>,
    pub total_new: usize,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageUpdatedResponseDto {
    pub status: String,
    pub message: String,
    pub updated_message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(sender_id: &str, role: &str, message: &str) -> SendMessageDto {
        SendMessageDto {
            sender_id: Some(sender_id.to_string()),
            sender_name: Some("Al".to_string()),
            sender_role: Some(role.to_string()),
            message: Some(message.to_string()),
        }
    }

    #[test]
    fn into_parts_accepts_a_complete_message() {
        let id = Uuid::new_v4();
        let (sender, body) = dto(&id.to_string(), "customer", "  hi ").into_parts().unwrap();

        assert_eq!(sender.sender_id, id);
        assert_eq!(sender.sender_role, UserRole::Customer);
        assert_eq!(body, "hi");
    }

    #[test]
    fn into_parts_rejects_missing_or_bad_fields() {
        let id = Uuid::new_v4().to_string();

        let missing = SendMessageDto {
            message: None,
            ..dto(&id, "agent", "x")
        };
        assert!(missing.into_parts().unwrap_err().contains("required"));
        assert!(dto(&id, "agent", "   ").into_parts().is_err());
        assert!(dto(&id, "manager", "hi")
            .into_parts()
            .unwrap_err()
            .starts_with("senderRole"));
        assert!(dto("u1", "agent", "hi").into_parts().is_err());
    }
}
