// src/db/ticketdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::{contains_pattern, DBClient};
use crate::models::ticketmodel::*;

const TICKET_COLUMNS: &str = r#"
    id, title, description, priority, user_email, user_name, user_id,
    assigned_agent_id, assigned_agent_name, status, created_at, updated_at
"#;

// Shared by the list and count queries; every filter is optional.
const TICKET_FILTER: &str = r#"
    WHERE ($1::ticket_status IS NULL OR status = $1)
      AND ($2::ticket_priority IS NULL OR priority = $2)
      AND ($3::text IS NULL OR user_email ILIKE $3)
      AND ($4::uuid IS NULL OR user_id = $4)
      AND ($5::uuid IS NULL OR assigned_agent_id = $5)
"#;

#[async_trait]
pub trait TicketExt {
    async fn save_ticket(&self, ticket: NewTicket) -> Result<Ticket, Error>;

    async fn get_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, Error>;

    async fn get_tickets(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Ticket>, Error>;

    async fn get_ticket_count(&self, filter: &TicketFilter) -> Result<i64, Error>;

    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        update: TicketUpdate,
    ) -> Result<Option<Ticket>, Error>;

    async fn delete_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, Error>;
}

#[async_trait]
impl TicketExt for DBClient {
    async fn save_ticket(&self, ticket: NewTicket) -> Result<Ticket, Error> {
        let (agent_id, agent_name) = match ticket.assigned_agent {
            Some(agent) => (Some(agent.agent_id), agent.agent_name),
            None => (None, String::new()),
        };

        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            INSERT INTO tickets
                (title, description, priority, user_email, user_name, user_id,
                 assigned_agent_id, assigned_agent_name, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            TICKET_COLUMNS
        ))
        .bind(ticket.title)
        .bind(ticket.description)
        .bind(ticket.priority)
        .bind(ticket.user_email)
        .bind(ticket.user_name)
        .bind(ticket.user_id)
        .bind(agent_id)
        .bind(agent_name)
        .bind(TicketStatus::Open)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {} FROM tickets WHERE id = $1",
            TICKET_COLUMNS
        ))
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_tickets(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            SELECT {}
            FROM tickets
            {}
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
            TICKET_COLUMNS, TICKET_FILTER
        ))
        .bind(filter.status)
        .bind(filter.priority)
        .bind(filter.user_email.as_deref().map(contains_pattern))
        .bind(filter.user_id)
        .bind(filter.assigned_agent_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_ticket_count(&self, filter: &TicketFilter) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM tickets {}", TICKET_FILTER))
            .bind(filter.status)
            .bind(filter.priority)
            .bind(filter.user_email.as_deref().map(contains_pattern))
            .bind(filter.user_id)
            .bind(filter.assigned_agent_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        update: TicketUpdate,
    ) -> Result<Option<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            UPDATE tickets
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                user_email = COALESCE($5, user_email),
                user_name = COALESCE($6, user_name),
                user_id = COALESCE($7, user_id),
                assigned_agent_id = COALESCE($8, assigned_agent_id),
                assigned_agent_name = COALESCE($9, assigned_agent_name),
                status = COALESCE($10, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TICKET_COLUMNS
        ))
        .bind(ticket_id)
        .bind(update.title)
        .bind(update.description)
        .bind(update.priority)
        .bind(update.user_email)
        .bind(update.user_name)
        .bind(update.user_id)
        .bind(update.assigned_agent_id)
        .bind(update.assigned_agent_name)
        .bind(update.status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(&format!(
            "DELETE FROM tickets WHERE id = $1 RETURNING {}",
            TICKET_COLUMNS
        ))
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
    }
}
