//! Coin history formatting for the "recent rewards" card.
//!
//! Turns ledger transactions into display rows: signed point labels,
//! category labels and relative timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::CoinTransaction;

/// Display row for a single coin award
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedCoinTransaction {
    pub id: String,
    pub points_label: String,
    pub category_label: String,
    pub description: String,
    pub when: String,
    pub raw_points: u64,
}

/// Formatting options for the history card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinHistoryConfig {
    /// Unit appended to point labels ("+5 coins")
    pub unit: String,
    /// Ages beyond this many days are shown as a date instead of "Nd ago"
    pub relative_days: i64,
}

impl Default for CoinHistoryConfig {
    fn default() -> Self {
        Self {
            unit: "coins".to_string(),
            relative_days: 6,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoinHistoryFormatter {
    config: CoinHistoryConfig,
}

impl CoinHistoryFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CoinHistoryConfig) -> Self {
        Self { config }
    }

    pub fn format_transactions<'a, I>(&self, transactions: I, now: DateTime<Utc>) -> Vec<FormattedCoinTransaction>
    where
        I: IntoIterator<Item = &'a CoinTransaction>,
    {
        transactions
            .into_iter()
            .map(|tx| self.format_single_transaction(tx, now))
            .collect()
    }

    pub fn format_single_transaction(&self, transaction: &CoinTransaction, now: DateTime<Utc>) -> FormattedCoinTransaction {
        FormattedCoinTransaction {
            id: transaction.id.clone(),
            points_label: self.format_points(transaction.points),
            category_label: transaction.category.label().to_string(),
            description: transaction.description.clone(),
            when: self.format_relative(transaction.created_at, now),
            raw_points: transaction.points,
        }
    }

    pub fn format_points(&self, points: u64) -> String {
        if points == 1 {
            format!("+1 {}", self.config.unit.trim_end_matches('s'))
        } else {
            format!("+{} {}", points, self.config.unit)
        }
    }

    /// "just now", "5m ago", "3h ago", "2d ago", then "Mar 4, 2025"
    pub fn format_relative(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let age = now.signed_duration_since(at);
        if age.num_minutes() < 1 {
            "just now".to_string()
        } else if age.num_hours() < 1 {
            format!("{}m ago", age.num_minutes())
        } else if age.num_days() < 1 {
            format!("{}h ago", age.num_hours())
        } else if age.num_days() <= self.config.relative_days {
            format!("{}d ago", age.num_days())
        } else {
            at.format("%b %-d, %Y").to_string()
        }
    }
}
