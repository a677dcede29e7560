//! Homework assignments

use shared::{HomeworkAssignment, HomeworkStatus};

use super::{ApiClient, ApiResult};

pub struct HomeworkApi<'a> {
    client: &'a ApiClient,
}

impl<'a> HomeworkApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Assignments for a child, optionally narrowed to one status
    pub async fn list(&self, child_id: &str, status: Option<HomeworkStatus>) -> ApiResult<Vec<HomeworkAssignment>> {
        let mut query = vec![("child_id", child_id.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_query().to_string()));
        }
        self.client.get("/homework", &query).await
    }
}
