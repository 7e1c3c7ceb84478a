// src/models/ticketmodel.rs
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "ticket_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "open" => Ok(TicketStatus::Open),
            "inprogress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err("Status must be one of: open, inprogress, resolved, closed".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "ticket_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl FromStr for TicketPriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "urgent" => Ok(TicketPriority::Urgent),
            _ => Err("Priority must be one of: low, medium, high, urgent".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub user_email: String,
    pub user_name: String,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_agent_id: Option<Uuid>,
    pub assigned_agent_name: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignedAgent {
    pub agent_id: Uuid,
    pub agent_name: String,
}

/// A validated ticket ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub user_email: String,
    pub user_name: String,
    pub user_id: Uuid,
    pub assigned_agent: Option<AssignedAgent>,
}

#[derive(Debug, Default, Clone)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TicketPriority>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub user_id: Option<Uuid>,
    pub assigned_agent_id: Option<Uuid>,
    pub assigned_agent_name: Option<String>,
    pub status: Option<TicketStatus>,
}

#[derive(Debug, Default, Clone)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub user_email: Option<String>,
    pub user_id: Option<Uuid>,
    pub assigned_agent_id: Option<Uuid>,
}
