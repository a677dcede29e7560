//! Coin ledger for the dashboard's reward system.
//!
//! The ledger owns an append-only log of coin transactions (newest first) and
//! the per-child balances derived from it. `add_coins` is the only write path,
//! so every balance always equals the sum of that child's logged points.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::CoinCategory;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::models::CoinTransaction;
use crate::domain::seed_data;

/// Number of transactions returned by `get_recent_transactions` when no limit is given
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// What `add_coins` does with a child id the ledger has never seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownChildPolicy {
    /// Credit the child and create its balance entry
    #[default]
    AcceptAndCreate,
    /// Refuse the credit; children must be seeded or registered first
    RejectUnknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Unknown child '{0}': register the child before awarding coins")]
    UnknownChild(String),
}

#[derive(Debug, Clone)]
pub struct CoinLedger {
    transactions: VecDeque<CoinTransaction>,
    balances: BTreeMap<String, u64>,
    next_sequence: u64,
    policy: UnknownChildPolicy,
    recent_limit: usize,
}

impl Default for CoinLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinLedger {
    /// Seeded ledger that accepts credits for unknown children
    pub fn new() -> Self {
        Self::with_policy(UnknownChildPolicy::default())
    }

    pub fn with_policy(policy: UnknownChildPolicy) -> Self {
        Self::seeded_at(policy, Utc::now())
    }

    /// Build the seed dataset with its newest entry one hour before `now`
    pub fn seeded_at(policy: UnknownChildPolicy, now: DateTime<Utc>) -> Self {
        let mut ledger = Self::empty(policy);
        let entries = seed_data::seed_entries();
        let total = entries.len() as i64;

        for (index, (child_id, category, description)) in entries.into_iter().enumerate() {
            let created_at = now - Duration::hours(total - index as i64);
            ledger.record(child_id, category, description, created_at);
        }

        info!(
            "Seeded coin ledger with {} transactions for {} children",
            ledger.transactions.len(),
            ledger.balances.len()
        );
        ledger
    }

    /// Ledger with no children and no transactions
    pub fn empty(policy: UnknownChildPolicy) -> Self {
        Self {
            transactions: VecDeque::new(),
            balances: BTreeMap::new(),
            next_sequence: 1,
            policy,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Override the default limit used by `get_recent_transactions(_, None)`
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn policy(&self) -> UnknownChildPolicy {
        self.policy
    }

    /// Award coins to a child for the given category, timestamped now
    pub fn add_coins(
        &mut self,
        child_id: &str,
        category: CoinCategory,
        description: &str,
    ) -> Result<CoinTransaction, LedgerError> {
        self.add_coins_at(child_id, category, description, Utc::now())
    }

    /// Award coins with an explicit clock reading.
    ///
    /// The stored timestamp never precedes the current head of the log.
    pub fn add_coins_at(
        &mut self,
        child_id: &str,
        category: CoinCategory,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<CoinTransaction, LedgerError> {
        if self.policy == UnknownChildPolicy::RejectUnknown && !self.balances.contains_key(child_id) {
            warn!("Rejected {} coins for unknown child {}", category.points(), child_id);
            return Err(LedgerError::UnknownChild(child_id.to_string()));
        }

        let created_at = match self.transactions.front() {
            Some(head) if head.created_at > now => head.created_at,
            _ => now,
        };

        let transaction = self.record(child_id, category, description.to_string(), created_at);
        info!(
            "Awarded {} coins to {} for {} ({}), balance now {}",
            transaction.points,
            child_id,
            category,
            transaction.id,
            self.get_total_coins(child_id)
        );
        Ok(transaction)
    }

    fn record(
        &mut self,
        child_id: &str,
        category: CoinCategory,
        description: String,
        created_at: DateTime<Utc>,
    ) -> CoinTransaction {
        let transaction = CoinTransaction {
            id: CoinTransaction::generate_id(category, self.next_sequence),
            child_id: child_id.to_string(),
            category,
            points: category.points(),
            description,
            created_at,
        };
        self.next_sequence += 1;

        *self.balances.entry(child_id.to_string()).or_insert(0) += transaction.points;
        self.transactions.push_front(transaction.clone());
        transaction
    }

    /// Mark a child as known without crediting anything
    pub fn register_child(&mut self, child_id: &str) {
        if !self.balances.contains_key(child_id) {
            info!("Registered child {} with the coin ledger", child_id);
            self.balances.insert(child_id.to_string(), 0);
        }
    }

    /// Current balance for a child, zero when the child has no entry
    pub fn get_total_coins(&self, child_id: &str) -> u64 {
        self.balances.get(child_id).copied().unwrap_or(0)
    }

    /// Up to `limit` of the child's newest transactions, newest first
    pub fn get_recent_transactions(&self, child_id: &str, limit: Option<usize>) -> Vec<&CoinTransaction> {
        let limit = limit.unwrap_or(self.recent_limit);
        debug!("Reading {} recent transactions for {}", limit, child_id);
        self.transactions
            .iter()
            .filter(|tx| tx.child_id == child_id)
            .take(limit)
            .collect()
    }

    /// The full log, newest first
    pub fn transactions(&self) -> impl Iterator<Item = &CoinTransaction> {
        self.transactions.iter()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Children with a balance entry, sorted by id
    pub fn children(&self) -> Vec<&str> {
        self.balances.keys().map(String::as_str).collect()
    }

    pub fn is_known_child(&self, child_id: &str) -> bool {
        self.balances.contains_key(child_id)
    }

    /// Points earned by a child with timestamps in `[start, end)`
    pub fn coins_earned_between(&self, child_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
        self.transactions
            .iter()
            .filter(|tx| tx.child_id == child_id && tx.created_at >= start && tx.created_at < end)
            .map(|tx| tx.points)
            .sum()
    }

    /// Recompute every balance from the log and describe any mismatch
    pub fn verify_balances(&self) -> Vec<String> {
        let mut expected: BTreeMap<&str, u64> = BTreeMap::new();
        for tx in &self.transactions {
            *expected.entry(tx.child_id.as_str()).or_insert(0) += tx.points;
        }

        let children: BTreeSet<&str> = expected
            .keys()
            .copied()
            .chain(self.balances.keys().map(String::as_str))
            .collect();

        let mut errors = Vec::new();
        for child_id in children {
            let expected_total = expected.get(child_id).copied().unwrap_or(0);
            let actual_total = self.get_total_coins(child_id);
            if expected_total != actual_total {
                let error = format!(
                    "Child {} has incorrect balance: expected {}, actual {}",
                    child_id, expected_total, actual_total
                );
                warn!("Coin balance validation error: {}", error);
                errors.push(error);
            }
        }
        errors
    }
}
