//! # REST Client Layer
//!
//! Thin wrappers around the dashboard backend. `ApiClient` owns the base URL,
//! the bearer token and the underlying HTTP client; each endpoint family gets a
//! small borrowed service (`client.bookings().list(..)`) whose methods map one
//! call to one endpoint and unwrap the `{success, message, data}` envelope.

pub mod auth;
pub mod bookings;
pub mod children;
pub mod error;
pub mod homework;
pub mod leaderboard;
pub mod progress;
pub mod support;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ApiEnvelope;
use std::borrow::Cow;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;

pub use auth::AuthApi;
pub use bookings::BookingsApi;
pub use children::ChildrenApi;
pub use error::{ApiError, ApiResult};
pub use homework::HomeworkApi;
pub use leaderboard::LeaderboardApi;
pub use progress::ProgressApi;
pub use support::SupportApi;

/// Percent-encode an id so it stays one path segment (`/`, `#`, `?` included).
///
/// Empty and dot-segment ids are refused: URL normalization would drop them.
pub(crate) fn path_segment(id: &str) -> ApiResult<Cow<'_, str>> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(ApiError::InvalidId(id.to_string()));
    }
    Ok(urlencoding::encode(id))
}

/// API client for communicating with the dashboard backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("base_url '{}': {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
            client,
        })
    }

    /// Client pointing at another base URL with default settings
    pub fn with_base_url(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    /// Same client, authenticated with `token` (e.g. after login)
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn children(&self) -> ChildrenApi<'_> {
        ChildrenApi::new(self)
    }

    pub fn progress(&self) -> ProgressApi<'_> {
        ProgressApi::new(self)
    }

    pub fn bookings(&self) -> BookingsApi<'_> {
        BookingsApi::new(self)
    }

    pub fn homework(&self) -> HomeworkApi<'_> {
        HomeworkApi::new(self)
    }

    pub fn leaderboard(&self) -> LeaderboardApi<'_> {
        LeaderboardApi::new(self)
    }

    pub fn support(&self) -> SupportApi<'_> {
        SupportApi::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T> {
        debug!("GET {}", path);
        let request = self.client.get(self.url(path)).query(query);
        let response = self.authorize(request).send().await?;
        self.handle_response(path, response).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        debug!("POST {}", path);
        let request = self.client.post(self.url(path)).json(body);
        let response = self.authorize(request).send().await?;
        self.handle_response(path, response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, path: &str, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("{} answered 401", path);
            return Err(ApiError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            warn!("{} answered 404", path);
            return Err(ApiError::NotFound(path.to_string()));
        }

        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .map(|envelope| envelope.message)
                .filter(|message| !message.is_empty())
                .unwrap_or(body);
            warn!("{} failed with {}: {}", path, status, message);
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            let message = if envelope.message.is_empty() {
                "Request failed".to_string()
            } else {
                envelope.message
            };
            warn!("{} rejected: {}", path, message);
            return Err(ApiError::Rejected(message));
        }

        envelope.data.ok_or_else(|| ApiError::MissingData(path.to_string()))
    }
}
