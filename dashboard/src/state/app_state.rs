//! # Dashboard State
//!
//! The single owner of everything the dashboard screens share.
//!
//! ## Key Responsibilities
//! - Owns the `CoinLedger` and the `ApiClient`, built once from `DashboardConfig`
//! - Tracks the active child (first child on the ledger until one is picked)
//! - Hands out data hooks bound to its client
//! - Assembles the coin summary card from ledger reads

use chrono::{DateTime, Utc};
use shared::{
    Booking, ChildSummary, CoinCategory, CoinSummary, HomeworkAssignment, HomeworkStatus, LeaderboardEntry,
    LeaderboardPeriod, ParentProfile, StudentProgress, SupportTicket,
};
use tracing::info;

use crate::config::DashboardConfig;
use crate::domain::coin_history::{CoinHistoryFormatter, FormattedCoinTransaction};
use crate::domain::coin_ledger::{CoinLedger, LedgerError, UnknownChildPolicy};
use crate::domain::insights::coins_earned_today;
use crate::domain::models::CoinTransaction;
use crate::io::api::{ApiClient, ApiResult};
use crate::io::mappers::CoinTransactionMapper;
use crate::state::hooks;
use crate::state::resource::Resource;

pub struct DashboardState {
    config: DashboardConfig,
    ledger: CoinLedger,
    api: ApiClient,
    active_child: Option<String>,
    history: CoinHistoryFormatter,
}

impl DashboardState {
    /// Seeded ledger plus a client for the configured backend
    pub fn new(config: DashboardConfig) -> ApiResult<Self> {
        let ledger = CoinLedger::with_policy(config.ledger.unknown_child_policy)
            .with_recent_limit(config.ledger.recent_limit);
        let api = ApiClient::new(&config.api)?;
        info!(
            "Dashboard state ready: {} children on the ledger, API at {}",
            ledger.children().len(),
            api.base_url()
        );
        Ok(Self::from_parts(config, ledger, api))
    }

    pub fn from_parts(config: DashboardConfig, ledger: CoinLedger, api: ApiClient) -> Self {
        Self {
            config,
            ledger,
            api,
            active_child: None,
            history: CoinHistoryFormatter::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn ledger(&self) -> &CoinLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut CoinLedger {
        &mut self.ledger
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Swap in the token returned by a successful login
    pub fn sign_in(&mut self, token: &str) {
        self.api = self.api.with_token(token);
        info!("Signed in, requests now carry a bearer token");
    }

    /// Explicit selection, else the first child on the ledger
    pub fn active_child(&self) -> Option<&str> {
        self.active_child
            .as_deref()
            .or_else(|| self.ledger.children().into_iter().next())
    }

    /// Selecting a child never touches the ledger; balances only appear through
    /// `award_coins`, `sync_children` or `register_child`.
    pub fn set_active_child(&mut self, child_id: &str) -> Result<(), LedgerError> {
        if self.ledger.policy() == UnknownChildPolicy::RejectUnknown && !self.ledger.is_known_child(child_id) {
            return Err(LedgerError::UnknownChild(child_id.to_string()));
        }
        info!("Active child set to {}", child_id);
        self.active_child = Some(child_id.to_string());
        Ok(())
    }

    /// Make every child the backend knows about known to the ledger too
    pub fn sync_children(&mut self, children: &[ChildSummary]) {
        for child in children {
            self.ledger.register_child(&child.id);
        }
    }

    pub fn award_coins(
        &mut self,
        child_id: &str,
        category: CoinCategory,
        description: &str,
    ) -> Result<CoinTransaction, LedgerError> {
        self.ledger.add_coins(child_id, category, description)
    }

    pub fn coin_summary(&self, child_id: &str) -> CoinSummary {
        CoinSummary {
            child_id: child_id.to_string(),
            total_coins: self.ledger.get_total_coins(child_id),
            earned_today: coins_earned_today(&self.ledger, child_id),
            recent_transactions: self
                .ledger
                .get_recent_transactions(child_id, None)
                .into_iter()
                .map(CoinTransactionMapper::to_dto)
                .collect(),
        }
    }

    pub fn recent_history(&self, child_id: &str, now: DateTime<Utc>) -> Vec<FormattedCoinTransaction> {
        self.history
            .format_transactions(self.ledger.get_recent_transactions(child_id, None), now)
    }

    pub fn use_profile(&self) -> Resource<ParentProfile> {
        hooks::use_profile(&self.api)
    }

    pub fn use_children(&self) -> Resource<Vec<ChildSummary>> {
        hooks::use_children(&self.api)
    }

    pub fn use_progress(&self, child_id: &str) -> Resource<StudentProgress> {
        hooks::use_progress(&self.api, child_id)
    }

    pub fn use_bookings(&self, child_id: &str) -> Resource<Vec<Booking>> {
        hooks::use_bookings(&self.api, child_id)
    }

    pub fn use_homework(&self, child_id: &str, status: Option<HomeworkStatus>) -> Resource<Vec<HomeworkAssignment>> {
        hooks::use_homework(&self.api, child_id, status)
    }

    pub fn use_leaderboard(&self, period: LeaderboardPeriod, limit: Option<u32>) -> Resource<Vec<LeaderboardEntry>> {
        hooks::use_leaderboard(&self.api, period, limit)
    }

    pub fn use_support_tickets(&self) -> Resource<Vec<SupportTicket>> {
        hooks::use_support_tickets(&self.api)
    }

    pub fn use_support_ticket(&self, ticket_id: &str) -> Resource<SupportTicket> {
        hooks::use_support_ticket(&self.api, ticket_id)
    }
}
