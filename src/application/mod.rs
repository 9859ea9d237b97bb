//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and the short code policy.
//! They consume repository traits so handlers never touch storage directly.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and retrieval
//! - [`services::stats_service::StatsService`] - Click totals per link

pub mod services;
