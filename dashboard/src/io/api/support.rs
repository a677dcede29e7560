//! Support tickets raised by the parent

use shared::{CreateTicketRequest, SupportTicket};
use tracing::info;

use super::{path_segment, ApiClient, ApiResult};

pub struct SupportApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SupportApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_tickets(&self) -> ApiResult<Vec<SupportTicket>> {
        self.client.get("/support/tickets", &[]).await
    }

    pub async fn get_ticket(&self, ticket_id: &str) -> ApiResult<SupportTicket> {
        let path = format!("/support/tickets/{}", path_segment(ticket_id)?);
        self.client.get(&path, &[]).await
    }

    pub async fn create_ticket(&self, request: &CreateTicketRequest) -> ApiResult<SupportTicket> {
        info!("Opening support ticket: {}", request.subject);
        self.client.post("/support/tickets", request).await
    }
}
