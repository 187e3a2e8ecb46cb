//! Crawler Fleet: operator control for a fleet of page-scraping workers
//!
//! This crate holds the client-side view of the crawler fleet reported by the
//! remote control API, derives search/filter/progress/status metrics from it,
//! and drives the edit, pause/resume and archive workflows against that API.

pub mod api;
pub mod config;
pub mod controller;
pub mod fleet;
pub mod output;
pub mod service;
pub mod state;

use thiserror::Error;

/// Main error type for fleet operations
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Control API error: {0}")]
    Api(#[from] ApiError),

    #[error("No crawler with id {id} in the current fleet view")]
    UnknownCrawler { id: String },

    #[error("Archive unavailable for crawler {id}: it must be paused and not yet archived")]
    ArchiveUnavailable { id: String },

    #[error("A {action} request for crawler {id} is still in flight")]
    ActionInFlight {
        id: String,
        action: controller::Action,
    },

    #[error("No edit in progress")]
    NoEditInProgress,

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors returned by the control API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Control API unreachable at {url}: {source}")]
    NetworkUnavailable { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns the HTTP status code if the server answered with an error status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for fleet operations
pub type Result<T> = std::result::Result<T, FleetError>;

/// Result type alias for control API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{ApiClient, Environment};
pub use config::Config;
pub use controller::FleetController;
pub use fleet::{CrawlerId, CrawlerInstance, CrawlerStatus, StatusCounts, StatusFilter};
pub use service::{CrawlerService, RemoteCrawlerService};
pub use state::RunState;
