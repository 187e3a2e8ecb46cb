//! Fleet data model and derived views
//!
//! This module holds everything computed from the crawler records reported by
//! the control API:
//! - `CrawlerInstance` and its field types, with the API's wire conventions
//!   isolated in the `wire` adapters
//! - `FleetQuery` / `StatusFilter` for search and status filtering
//! - Per-record derived metrics and fleet-wide `StatusCounts`

mod edit;
mod filter;
mod metrics;
mod model;
pub mod wire;

pub use edit::{CrawlerEdit, EditField};
pub use filter::{FleetQuery, StatusFilter};
pub use metrics::{StatusCounts, UsageLevel};
pub use model::{
    ConsolidatedFile, CrawlerId, CrawlerInstance, CrawlerStatus, DataSize, OpaqueId, PageId,
    PageOutcome,
};
