use serde::Deserialize;
use uuid::Uuid;

use super::non_empty;
use crate::models::ticketmodel::*;

fn parse_id(value: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("{} must be a valid id", field))
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub user_id: Option<String>,
}

impl CreateTicketDto {
    pub fn into_new_ticket(self) -> Result<NewTicket, String> {
        let (Some(title), Some(description), Some(priority), Some(user_email), Some(user_name), Some(user_id)) = (
            non_empty(self.title),
            non_empty(self.description),
            non_empty(self.priority),
            non_empty(self.user_email),
            non_empty(self.user_name),
            non_empty(self.user_id),
        ) else {
            return Err(
                "All fields (title, description, priority, userEmail, userName, userId) are required"
                    .to_string(),
            );
        };

        Ok(NewTicket {
            title,
            description,
            priority: priority.parse()?,
            user_email: user_email.to_lowercase(),
            user_name,
            user_id: parse_id(&user_id, "userId")?,
            assigned_agent: None,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub user_id: Option<String>,
    pub assigned_agent_id: Option<String>,
    pub assigned_agent_name: Option<String>,
    pub status: Option<String>,
}

impl UpdateTicketDto {
    pub fn into_update(self) -> Result<TicketUpdate, String> {
        Ok(TicketUpdate {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            priority: self.priority.map(|p| p.parse()).transpose()?,
            user_email: self.user_email.map(|e| e.trim().to_lowercase()),
            user_name: self.user_name.map(|n| n.trim().to_string()),
            user_id: self
                .user_id
                .map(|id| parse_id(&id, "userId"))
                .transpose()?,
            assigned_agent_id: self
                .assigned_agent_id
                .map(|id| parse_id(&id, "assignedAgentId"))
                .transpose()?,
            assigned_agent_name: self.assigned_agent_name,
            status: self.status.map(|s| s.parse()).transpose()?,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketQueryDto {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub user_email: Option<String>,
    pub user_id: Option<String>,
    pub assigned_agent_id: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TicketQueryDto {
    pub fn to_filter(&self) -> Result<TicketFilter, String> {
        Ok(TicketFilter {
            status: non_empty(self.status.clone()).map(|s| s.parse()).transpose()?,
            priority: non_empty(self.priority.clone()).map(|p| p.parse()).transpose()?,
            user_email: non_empty(self.user_email.clone()),
            user_id: non_empty(self.user_id.clone())
                .map(|id| parse_id(&id, "userId"))
                .transpose()?,
            assigned_agent_id: non_empty(self.assigned_agent_id.clone())
                .map(|id| parse_id(&id, "assignedAgentId"))
                .transpose()?,
        })
    }
}
