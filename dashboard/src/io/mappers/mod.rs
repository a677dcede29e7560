pub mod coin_transaction_mapper;

pub use coin_transaction_mapper::CoinTransactionMapper;
