use crate::api::{ApiClient, ApiError};
use crate::models::{
    NewComment, NewTicket, Ticket, TicketComment, TicketFilter, TicketStatus, TicketUpdate,
};

use super::Resource;

const TICKETS_PATH: &str = "/tickets";

/// Tickets plus their status, assignment and comment endpoints.
#[derive(Clone)]
pub struct TicketService {
    tickets: Resource<Ticket>,
}

impl TicketService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            tickets: Resource::new(api, TICKETS_PATH),
        }
    }

    pub async fn list(&self) -> Result<Vec<Ticket>, ApiError> {
        self.tickets.list().await
    }

    pub async fn list_filtered(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, ApiError> {
        if filter.is_empty() {
            return self.tickets.list().await;
        }
        self.tickets.list_with(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Ticket, ApiError> {
        self.tickets.get(id).await
    }

    pub async fn create(&self, ticket: &NewTicket) -> Result<Ticket, ApiError> {
        self.tickets.create(ticket).await
    }

    pub async fn update(&self, id: i64, update: &TicketUpdate) -> Result<Ticket, ApiError> {
        self.tickets.update(id, update).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.tickets.delete(id).await
    }

    pub async fn set_status(&self, id: i64, status: TicketStatus) -> Result<Ticket, ApiError> {
        let update = TicketUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.tickets.update(id, &update).await
    }

    pub async fn assign(&self, id: i64, agent_id: i64) -> Result<Ticket, ApiError> {
        let update = TicketUpdate {
            agent_id: Some(agent_id),
            ..Default::default()
        };
        self.tickets.update(id, &update).await
    }

    pub async fn comments(&self, id: i64) -> Result<Vec<TicketComment>, ApiError> {
        let path = format!("{}/comments", self.tickets.item_path(id));
        self.tickets.api().get_json(&path).await
    }

    pub async fn add_comment(&self, id: i64, comment: &NewComment) -> Result<TicketComment, ApiError> {
        let path = format!("{}/comments", self.tickets.item_path(id));
        self.tickets.api().post_json(&path, comment).await
    }
}
