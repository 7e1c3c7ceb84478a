// db/chatdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatmodels::*;

#[async_trait]
pub trait ChatExt {
    async fn get_chat_by_ticket(&self, ticket_id: Uuid) -> Result<Option<ChatThread>, Error>;

    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<ChatThread>, Error>;

    /// Returns the ticket's thread, inserting an empty one first if there is none.
    async fn create_or_get_chat(&self, ticket_id: Uuid) -> Result<ChatThread, Error>;

    /// Writes the whole thread document, inserting it if it has never been stored.
    async fn save_chat(&self, chat: &ChatThread) -> Result<ChatThread, Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn get_chat_by_ticket(&self, ticket_id: Uuid) -> Result<Option<ChatThread>, Error> {
        sqlx::query_as::<_, ChatThread>(
            r#"
            SELECT id, ticket_id, messages, last_updated, created_at, updated_at
            FROM chats
            WHERE ticket_id = $1
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<ChatThread>, Error> {
        sqlx::query_as::<_, ChatThread>(
            r#"
            SELECT id, ticket_id, messages, last_updated, created_at, updated_at
            FROM chats
            WHERE id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_or_get_chat(&self, ticket_id: Uuid) -> Result<ChatThread, Error> {
        if let Some(chat) = self.get_chat_by_ticket(ticket_id).await? {
            return Ok(chat);
        }

        // A concurrent reader may have created the row in between; the no-op
        // update makes RETURNING yield the existing thread in that case.
        sqlx::query_as::<_, ChatThread>(
            r#"
            INSERT INTO chats (id, ticket_id, messages)
            VALUES ($1, $2, '[]'::jsonb)
            ON CONFLICT (ticket_id) DO UPDATE SET ticket_id = EXCLUDED.ticket_id
            RETURNING id, ticket_id, messages, last_updated, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ticket_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn save_chat(&self, chat: &ChatThread) -> Result<ChatThread, Error> {
        sqlx::query_as::<_, ChatThread>(
            r#"
            INSERT INTO chats (id, ticket_id, messages, last_updated, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (ticket_id) DO UPDATE
            SET messages = EXCLUDED.messages,
                last_updated = EXCLUDED.last_updated,
                updated_at = NOW()
            RETURNING id, ticket_id, messages, last_updated, created_at, updated_at
            "#,
        )
        .bind(chat.id)
        .bind(chat.ticket_id)
        .bind(&chat.messages)
        .bind(chat.last_updated)
        .bind(chat.created_at)
        .fetch_one(&self.pool)
        .await
    }
}
