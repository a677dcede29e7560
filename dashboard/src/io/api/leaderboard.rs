//! Coin leaderboard across the platform

use shared::{LeaderboardEntry, LeaderboardPeriod};

use super::{ApiClient, ApiResult};

pub struct LeaderboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LeaderboardApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, period: LeaderboardPeriod, limit: Option<u32>) -> ApiResult<Vec<LeaderboardEntry>> {
        let mut query = vec![("period", period.as_query().to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.client.get("/leaderboard", &query).await
    }
}
