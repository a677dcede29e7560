//! # Domain Module
//!
//! Business logic for the parent dashboard, independent of HTTP and of any
//! UI framework.
//!
//! - **coin_ledger**: per-child coin balances and the append-only award log
//! - **coin_history**: display formatting for recent awards
//! - **insights**: greeting, progress percentages and other derived card values
//! - **forms**: validation for login, booking and support ticket forms
//!
//! ## Business Rules
//!
//! - Coins are only ever added, each category has a fixed value
//! - A child's balance is the sum of its logged awards
//! - Forms are validated before any request is sent

pub mod coin_history;
pub mod coin_ledger;
pub mod forms;
pub mod insights;
pub mod models;
mod seed_data;

pub use coin_history::*;
pub use coin_ledger::*;
pub use forms::*;
pub use insights::*;
