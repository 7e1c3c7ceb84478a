// service/ticket_service.rs
use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use uuid::Uuid;

use crate::{
    db::{db::DBClient, ticketdb::TicketExt, userdb::UserExt},
    dtos::ticketdtos::{CreateTicketDto, UpdateTicketDto},
    models::{
        ticketmodel::{AssignedAgent, Ticket, TicketFilter},
        usermodel::User,
    },
    service::error::ServiceError,
    utils::pagination::PageRequest,
};

/// Uniform pick over the agent pool; `None` when nobody holds the agent role.
pub fn pick_agent<'a, R: Rng + ?Sized>(agents: &'a [User], rng: &mut R) -> Option<&'a User> {
    agents.choose(rng)
}

#[derive(Debug)]
pub struct TicketService<D = DBClient> {
    db_client: Arc<D>,
    rng: Mutex<StdRng>,
}

impl<D> TicketService<D>
where
    D: TicketExt + UserExt + Send + Sync,
{
    pub fn new(db_client: Arc<D>) -> Self {
        Self::with_rng(db_client, StdRng::from_os_rng())
    }

    pub fn with_rng(db_client: Arc<D>, rng: StdRng) -> Self {
        Self {
            db_client,
            rng: Mutex::new(rng),
        }
    }

    /// Chooses an agent for a new ticket. Lookup failures leave the ticket
    /// unassigned.
    async fn assign_agent(&self) -> Option<AssignedAgent> {
        let agents = match self.db_client.get_agents().await {
            Ok(agents) => agents,
            Err(e) => {
                tracing::warn!("agent lookup failed, ticket left unassigned: {}", e);
                return None;
            }
        };

        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        pick_agent(&agents, &mut *rng).map(|agent| AssignedAgent {
            agent_id: agent.id,
            agent_name: agent.fullname.clone(),
        })
    }

    pub async fn create_ticket(&self, body: CreateTicketDto) -> Result<Ticket, ServiceError> {
        let mut new_ticket = body.into_new_ticket()?;
        new_ticket.assigned_agent = self.assign_agent().await;

        let ticket = self.db_client.save_ticket(new_ticket).await?;

        match &ticket.assigned_agent_id {
            Some(agent_id) => tracing::info!("ticket {} assigned to agent {}", ticket.id, agent_id),
            None => tracing::info!("ticket {} created without an agent", ticket.id),
        }

        Ok(ticket)
    }

    pub async fn get_ticket(&self, ticket_id: Uuid) -> Result<Ticket, ServiceError> {
        self.db_client
            .get_ticket(ticket_id)
            .await?
            .ok_or(ServiceError::TicketNotFound(ticket_id))
    }

    /// One page of matching tickets, newest first, with the total match count.
    pub async fn list_tickets(
        &self,
        filter: &TicketFilter,
        page: PageRequest,
    ) -> Result<(Vec<Ticket>, i64), ServiceError> {
        let tickets = self
            .db_client
            .get_tickets(filter, page.limit(), page.offset())
            .await?;
        let total = self.db_client.get_ticket_count(filter).await?;

        Ok((tickets, total))
    }

    pub async fn update_ticket(
        &self,
        ticket_id: Uuid,
        body: UpdateTicketDto,
    ) -> Result<Ticket, ServiceError> {
        let update = body.into_update()?;

        self.db_client
            .update_ticket(ticket_id, update)
            .await?
            .ok_or(ServiceError::TicketNotFound(ticket_id))
    }

    pub async fn delete_ticket(&self, ticket_id: Uuid) -> Result<Ticket, ServiceError> {
        let ticket = self
            .db_client
            .delete_ticket(ticket_id)
            .await?
            .ok_or(ServiceError::TicketNotFound(ticket_id))?;

        tracing::info!("ticket {} deleted", ticket_id);
        Ok(ticket)
    }
}
