//! Children linked to the signed-in parent

use shared::ChildSummary;

use super::{ApiClient, ApiResult};

pub struct ChildrenApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ChildrenApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<ChildSummary>> {
        self.client.get("/parent/children", &[]).await
    }
}
