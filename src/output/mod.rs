//! Output module for rendering the fleet to the terminal
//!
//! This is the display boundary: units, labels and markers are attached here
//! and nowhere else. Every function returns the rendered text so callers
//! decide where it goes.

mod details;
mod table;

pub use details::{format_details, format_edit_form};
pub use table::{format_fleet_table, format_status_counts};

use crate::fleet::{CrawlerStatus, DataSize, UsageLevel};

/// Renders a data volume with its unit
pub fn format_data_size(size: DataSize) -> String {
    if size.megabytes() >= 1024.0 {
        format!("{:.2} GB", size.gigabytes())
    } else {
        format!("{:.2} MB", size.megabytes())
    }
}

/// Renders a utilization percentage with its severity band
pub fn format_usage(percent: i64) -> String {
    match UsageLevel::from_percent(percent) {
        UsageLevel::Normal => format!("{}%", percent),
        level => format!("{}% ({})", percent, level.as_str()),
    }
}

/// Marker shown next to a status
pub fn status_marker(status: &CrawlerStatus) -> &'static str {
    match status {
        CrawlerStatus::Online => "●",
        CrawlerStatus::Offline => "○",
        CrawlerStatus::Error => "✖",
        CrawlerStatus::Maintenance => "◐",
        CrawlerStatus::Unknown(_) => "·",
    }
}

/// Human label for a status
pub fn status_label(status: &CrawlerStatus) -> &str {
    match status {
        CrawlerStatus::Online => "Online",
        CrawlerStatus::Offline => "Offline",
        CrawlerStatus::Error => "Error",
        CrawlerStatus::Maintenance => "Maintenance",
        CrawlerStatus::Unknown(raw) => raw,
    }
}
