use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the fleet dashboard
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Control API transport configuration
///
/// The base endpoint is not configurable here; it is fixed at build time
/// (see [`crate::api::Environment`]).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Total request timeout (milliseconds). No timeout when absent.
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: Option<u64>,

    /// Connection establishment timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms")]
    pub connect_timeout_ms: Option<u64>,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

/// Initial query state of the fleet list
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// `all` or one of the four known statuses
    #[serde(rename = "status-filter", default = "default_status_filter")]
    pub status_filter: String,

    /// Initial free-text search term
    #[serde(default)]
    pub search: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            status_filter: default_status_filter(),
            search: String::new(),
        }
    }
}

fn default_status_filter() -> String {
    "all".to_string()
}
