// service/chat_service.rs
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    db::{chatdb::ChatExt, db::DBClient, ticketdb::TicketExt},
    dtos::{
        chatdtos::{EditMessageDto, SendMessageDto},
        non_empty,
    },
    middleware::Credential,
    models::{
        chatmodels::{ChatMessage, ChatThread},
        ticketmodel::Ticket,
    },
    service::error::ServiceError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub message: ChatMessage,
    pub chat_id: Uuid,
    pub ticket_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMessages {
    pub chat_id: Uuid,
    pub ticket_id: Uuid,
    pub new_messages: Vec<ChatMessage>,
    pub last_updated: DateTime<Utc>,
}

/// Parses the `lastSeenTimestamp` query value. Accepts RFC 3339, a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` read as UTC, or a bare date meaning midnight UTC.
pub fn parse_last_seen(value: &str) -> Result<DateTime<Utc>, ServiceError> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    Err(ServiceError::Validation(
        "Invalid lastSeenTimestamp format".to_string(),
    ))
}

fn is_sender(message: &ChatMessage, acting_user_id: Option<&str>) -> bool {
    acting_user_id
        .and_then(|id| Uuid::parse_str(id.trim()).ok())
        .map_or(false, |id| id == message.sender_id)
}

#[derive(Debug)]
pub struct ChatService<D = DBClient> {
    db_client: Arc<D>,
}

impl<D> ChatService<D>
where
    D: TicketExt + ChatExt + Send + Sync,
{
    pub fn new(db_client: Arc<D>) -> Self {
        Self { db_client }
    }

    async fn require_ticket(&self, ticket_id: Uuid) -> Result<Ticket, ServiceError> {
        self.db_client
            .get_ticket(ticket_id)
            .await?
            .ok_or(ServiceError::TicketNotFound(ticket_id))
    }

    async fn require_thread(&self, ticket_id: Uuid) -> Result<ChatThread, ServiceError> {
        self.db_client
            .get_chat_by_ticket(ticket_id)
            .await?
            .ok_or(ServiceError::ChatNotFoundForTicket(ticket_id))
    }

    /// Returns the ticket's thread. Creates and stores an empty one when the
    /// ticket has never been chatted on, so this read may write.
    pub async fn get_or_create_thread(&self, ticket_id: Uuid) -> Result<ChatThread, ServiceError> {
        self.require_ticket(ticket_id).await?;

        let thread = self.db_client.create_or_get_chat(ticket_id).await?;
        Ok(thread)
    }

    pub async fn get_thread(&self, chat_id: Uuid) -> Result<ChatThread, ServiceError> {
        self.db_client
            .get_chat_by_id(chat_id)
            .await?
            .ok_or(ServiceError::ChatNotFound(chat_id))
    }

    pub async fn post_message(
        &self,
        ticket_id: Uuid,
        body: SendMessageDto,
    ) -> Result<PostedMessage, ServiceError> {
        let (sender, text) = body.into_parts()?;

        self.require_ticket(ticket_id).await?;

        let now = Utc::now();
        let mut thread = match self.db_client.get_chat_by_ticket(ticket_id).await? {
            Some(thread) => thread,
            None => ChatThread::new(ticket_id, now),
        };

        let message = thread.push_message(sender, &text, now);
        let saved = self.db_client.save_chat(&thread).await?;

        tracing::info!(
            "message {} posted to chat {} of ticket {}",
            message.id,
            saved.id,
            ticket_id
        );

        Ok(PostedMessage {
            message,
            chat_id: saved.id,
            ticket_id: saved.ticket_id,
        })
    }

    pub async fn edit_message(
        &self,
        ticket_id: Uuid,
        message_id: Uuid,
        body: EditMessageDto,
        credential: &Credential,
    ) -> Result<ChatMessage, ServiceError> {
        let text = non_empty(body.message)
            .ok_or_else(|| ServiceError::Validation("Message content is required".to_string()))?;

        self.require_ticket(ticket_id).await?;
        let mut thread = self.require_thread(ticket_id).await?;
        let index = thread
            .position_of(message_id)
            .ok_or(ServiceError::MessageNotFound(message_id))?;

        credential.authenticate()?;
        let is_own = thread
            .message_at(index)
            .map_or(false, |m| is_sender(m, body.user_id.as_deref()));
        if !is_own {
            return Err(ServiceError::Forbidden(
                "You can only edit your own messages".to_string(),
            ));
        }

        let updated = thread
            .edit_message(index, &text, Utc::now())
            .ok_or(ServiceError::MessageNotFound(message_id))?;
        self.db_client.save_chat(&thread).await?;

        tracing::info!("message {} edited in chat {}", message_id, thread.id);
        Ok(updated)
    }

    pub async fn delete_message(
        &self,
        ticket_id: Uuid,
        message_id: Uuid,
        acting_user_id: &str,
        credential: &Credential,
    ) -> Result<ChatMessage, ServiceError> {
        self.require_ticket(ticket_id).await?;
        let mut thread = self.require_thread(ticket_id).await?;
        let index = thread
            .position_of(message_id)
            .ok_or(ServiceError::MessageNotFound(message_id))?;

        credential.authenticate()?;
        let is_own = thread
            .message_at(index)
            .map_or(false, |m| is_sender(m, Some(acting_user_id)));
        if !is_own {
            return Err(ServiceError::Forbidden(
                "You can only delete your own messages".to_string(),
            ));
        }

        let removed = thread
            .remove_message(index, Utc::now())
            .ok_or(ServiceError::MessageNotFound(message_id))?;
        self.db_client.save_chat(&thread).await?;

        tracing::info!("message {} deleted from chat {}", message_id, thread.id);
        Ok(removed)
    }

    /// Messages newer than `last_seen`. Unlike [`Self::get_or_create_thread`]
    /// this never creates the thread.
    pub async fn new_messages_since(
        &self,
        ticket_id: Uuid,
        last_seen: Option<&str>,
    ) -> Result<NewMessages, ServiceError> {
        self.require_ticket(ticket_id).await?;
        let thread = self.require_thread(ticket_id).await?;

        let since = match last_seen.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => Some(parse_last_seen(value)?),
            None => None,
        };

        Ok(NewMessages {
            chat_id: thread.id,
            ticket_id: thread.ticket_id,
            new_messages: thread.messages_since(since),
            last_updated: thread.last_updated,
        })
    }
}
