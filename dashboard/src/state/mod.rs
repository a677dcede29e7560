//! # State Module
//!
//! View-facing state: the dashboard-wide `DashboardState` and the data hooks
//! that load backend resources into `FetchState` snapshots.

pub mod app_state;
pub mod fetch_state;
pub mod hooks;
pub mod resource;

pub use app_state::DashboardState;
pub use fetch_state::FetchState;
pub use hooks::*;
pub use resource::{Resource, StateHandle};
