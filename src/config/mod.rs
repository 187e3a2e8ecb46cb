//! Configuration module for the fleet dashboard
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section has defaults, so an empty file (or no
//! file at all) yields a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use crawler_fleet::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("fleet.toml")).unwrap();
//! println!("Initial status filter: {}", config.dashboard.status_filter);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, DashboardConfig};

// Re-export parser functions
pub use parser::{load_config, load_optional_config, parse_config};
