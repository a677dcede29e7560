//! # IO Module
//!
//! Everything that crosses the process boundary or the domain/view boundary:
//!
//! - **api**: REST client and one service per endpoint family
//! - **mappers**: conversions between domain models and shared DTOs

pub mod api;
pub mod mappers;

pub use api::{ApiClient, ApiError, ApiResult};
