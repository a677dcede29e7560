//! Sign-in and parent profile endpoints

use shared::{LoginRequest, LoginResponse, ParentProfile};
use tracing::info;

use super::{ApiClient, ApiResult};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        info!("Signing in as {}", request.email);
        self.client.post("/auth/login", request).await
    }

    pub async fn profile(&self) -> ApiResult<ParentProfile> {
        self.client.get("/parent/profile", &[]).await
    }
}
