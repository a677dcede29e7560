use chrono::{DateTime, Utc};
use shared::CoinCategory;
use std::fmt;

/// A single, immutable coin award as kept in the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct CoinTransaction {
    pub id: String,
    pub child_id: String,
    pub category: CoinCategory,
    pub points: u64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl CoinTransaction {
    /// Generate a transaction id from its category and ledger sequence number
    pub fn generate_id(category: CoinCategory, sequence: u64) -> String {
        format!("coin::{}::{}", category.key(), sequence)
    }

    /// Parse a transaction id back into its category and sequence number
    pub fn parse_id(id: &str) -> Result<(CoinCategory, u64), CoinIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "coin" {
            return Err(CoinIdError::InvalidFormat);
        }

        let category = parts[1]
            .parse::<CoinCategory>()
            .map_err(|_| CoinIdError::InvalidCategory)?;
        let sequence = parts[2]
            .parse::<u64>()
            .map_err(|_| CoinIdError::InvalidSequence)?;

        Ok((category, sequence))
    }

    pub fn sequence(&self) -> Result<u64, CoinIdError> {
        Self::parse_id(&self.id).map(|(_, sequence)| sequence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoinIdError {
    InvalidFormat,
    InvalidCategory,
    InvalidSequence,
}

impl fmt::Display for CoinIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinIdError::InvalidFormat => write!(f, "Invalid coin transaction ID format"),
            CoinIdError::InvalidCategory => write!(f, "Invalid category in coin transaction ID"),
            CoinIdError::InvalidSequence => write!(f, "Invalid sequence in coin transaction ID"),
        }
    }
}

impl std::error::Error for CoinIdError {}
