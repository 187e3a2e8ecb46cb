//! Fleet list rendering: status summary and the crawler table

use crate::fleet::{CrawlerInstance, CrawlerStatus, StatusCounts};
use crate::output::{format_data_size, format_usage, status_label, status_marker};
use crate::state::{PauseAffordance, RunState};
use std::fmt::Write;

/// Renders the four status counters
pub fn format_status_counts(counts: &StatusCounts) -> String {
    CrawlerStatus::KNOWN
        .iter()
        .map(|status| format!("{}: {}", status_label(status), counts.get(status)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Renders one row per crawler
///
/// Rows whose cursor sits at the end of its page range are flagged with `!`.
pub fn format_fleet_table(crawlers: &[CrawlerInstance]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "  {:<8} {:<24} {:<14} {:<18} {:>5} {:>7} {:>6} {:>6} {:>6} {:>11} {:<14} {:<14} {:<9} {}",
        "ID", "NAME", "STATUS", "CITY", "YEAR", "PAGE", "LEFT", "TOTAL", "FILES", "DATA", "CPU",
        "RAM", "STATE", "ACTION"
    );

    for crawler in crawlers {
        let flag = if crawler.is_blocked() { "!" } else { " " };
        let status = format!("{} {}", status_marker(&crawler.status), crawler.status);

        let _ = writeln!(
            out,
            "{} {:<8} {:<24} {:<14} {:<18} {:>5} {:>7} {:>6} {:>6} {:>6} {:>11} {:<14} {:<14} {:<9} {}",
            flag,
            crawler.id,
            truncate(&crawler.name, 24),
            status,
            truncate(&crawler.cidade, 18),
            crawler.ano,
            crawler.pagina_atual,
            crawler.pages_remaining(),
            crawler.pages_total(),
            crawler.file_count(),
            format_data_size(crawler.data),
            format_usage(crawler.cpu),
            format_usage(crawler.memory),
            RunState::of(crawler),
            PauseAffordance::of(crawler).label(),
        );
    }

    if crawlers.is_empty() {
        out.push_str("  (no crawlers match)\n");
    }

    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
