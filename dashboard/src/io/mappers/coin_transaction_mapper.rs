use chrono::{DateTime, SecondsFormat, Utc};
use shared::CoinTransaction as SharedCoinTransaction;

use crate::domain::models::CoinTransaction as DomainCoinTransaction;

pub struct CoinTransactionMapper;

impl CoinTransactionMapper {
    pub fn to_dto(domain: &DomainCoinTransaction) -> SharedCoinTransaction {
        SharedCoinTransaction {
            id: domain.id.clone(),
            child_id: domain.child_id.clone(),
            category: domain.category,
            points: domain.points,
            description: domain.description.clone(),
            created_at: domain.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_domain(dto: SharedCoinTransaction) -> Result<DomainCoinTransaction, chrono::ParseError> {
        let created_at = DateTime::parse_from_rfc3339(&dto.created_at)?.with_timezone(&Utc);
        Ok(DomainCoinTransaction {
            id: dto.id,
            child_id: dto.child_id,
            category: dto.category,
            points: dto.points,
            description: dto.description,
            created_at,
        })
    }
}
