//! Per-student lesson progress

use shared::StudentProgress;

use super::{path_segment, ApiClient, ApiResult};

pub struct ProgressApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProgressApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn for_child(&self, child_id: &str) -> ApiResult<StudentProgress> {
        let path = format!("/students/{}/progress", path_segment(child_id)?);
        self.client.get(&path, &[]).await
    }
}
