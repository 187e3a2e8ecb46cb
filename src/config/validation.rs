use crate::config::types::{ApiConfig, Config, DashboardConfig};
use crate::fleet::StatusFilter;
use crate::ConfigError;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 600_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_dashboard_config(&config.dashboard)?;
    Ok(())
}

/// Validates control API transport configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    if let Some(ms) = config.request_timeout_ms {
        validate_timeout("request-timeout-ms", ms)?;
    }

    if let Some(ms) = config.connect_timeout_ms {
        validate_timeout("connect-timeout-ms", ms)?;
    }

    if let (Some(connect), Some(request)) = (config.connect_timeout_ms, config.request_timeout_ms)
    {
        if connect > request {
            return Err(ConfigError::Validation(format!(
                "connect-timeout-ms ({}) cannot exceed request-timeout-ms ({})",
                connect, request
            )));
        }
    }

    Ok(())
}

fn validate_timeout(name: &str, ms: u64) -> Result<(), ConfigError> {
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&ms) {
        return Err(ConfigError::Validation(format!(
            "{} must be between {} and {}, got {}",
            name, MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, ms
        )));
    }
    Ok(())
}

/// Validates the initial dashboard query state
fn validate_dashboard_config(config: &DashboardConfig) -> Result<(), ConfigError> {
    config
        .status_filter
        .parse::<StatusFilter>()
        .map_err(|e| ConfigError::Validation(format!("status-filter: {}", e)))?;
    Ok(())
}
