pub mod coin_transaction;

pub use coin_transaction::{CoinIdError, CoinTransaction};
