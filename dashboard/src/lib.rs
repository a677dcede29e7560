//! # Parent Dashboard
//!
//! Core of the parent learning dashboard: the coin ledger that rewards class,
//! homework and game completion, typed wrappers around the dashboard REST API,
//! data hooks that turn those calls into `{data, is_loading, error}` state,
//! and the derived values and form checks the screens need.
//!
//! ## Layout
//! - **domain**: ledger, insights, history formatting, form validation
//! - **io**: REST client and DTO mappers
//! - **state**: `DashboardState` and the data hooks
//! - **config** / **logging**: YAML + env configuration, tracing setup

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod state;

pub use config::{ConfigError, DashboardConfig};
pub use domain::{CoinLedger, LedgerError, UnknownChildPolicy};
pub use io::{ApiClient, ApiError, ApiResult};
pub use state::{DashboardState, FetchState, Resource};
