//! Per-record derived metrics and fleet-wide status aggregation
//!
//! Nothing here is stored; every value is recomputed from the current
//! collection whenever it is rendered.

use crate::fleet::model::{CrawlerInstance, CrawlerStatus};

/// Severity band for a resource-utilization percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UsageLevel {
    Normal,
    Medium,
    High,
}

impl UsageLevel {
    pub const MEDIUM_THRESHOLD: i64 = 60;
    pub const HIGH_THRESHOLD: i64 = 80;

    pub fn from_percent(percent: i64) -> Self {
        if percent >= Self::HIGH_THRESHOLD {
            Self::High
        } else if percent >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl CrawlerInstance {
    /// Pages left between the cursor and the end of the range
    ///
    /// Backend values are trusted, so this can be negative when the cursor
    /// has run past `pagina_final`.
    pub fn pages_remaining(&self) -> i64 {
        self.pagina_final.saturating_sub(self.pagina_atual)
    }

    /// Size of the inclusive page range
    pub fn pages_total(&self) -> i64 {
        self.pagina_final
            .saturating_sub(self.pagina_inicial)
            .saturating_add(1)
    }

    /// True when the cursor sits exactly at the end of its range,
    /// regardless of the reported status
    pub fn is_blocked(&self) -> bool {
        self.pages_remaining() == 0
    }

    pub fn cpu_level(&self) -> UsageLevel {
        UsageLevel::from_percent(self.cpu)
    }

    pub fn memory_level(&self) -> UsageLevel {
        UsageLevel::from_percent(self.memory)
    }

    pub fn file_count(&self) -> usize {
        self.files_consolidateds.len()
    }

    /// Number of pages whose processing failed
    pub fn failed_pages(&self) -> usize {
        self.paginas.iter().filter(|p| !p.succeeded()).count()
    }
}

/// Number of crawlers in each known status
///
/// Records with an unrecognized status are not counted anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub online: usize,
    pub offline: usize,
    pub error: usize,
    pub maintenance: usize,
}

impl StatusCounts {
    pub fn from_crawlers<'a>(crawlers: impl IntoIterator<Item = &'a CrawlerInstance>) -> Self {
        let mut counts = Self::default();
        for crawler in crawlers {
            match crawler.status {
                CrawlerStatus::Online => counts.online += 1,
                CrawlerStatus::Offline => counts.offline += 1,
                CrawlerStatus::Error => counts.error += 1,
                CrawlerStatus::Maintenance => counts.maintenance += 1,
                CrawlerStatus::Unknown(_) => {}
            }
        }
        counts
    }

    pub fn get(&self, status: &CrawlerStatus) -> usize {
        match status {
            CrawlerStatus::Online => self.online,
            CrawlerStatus::Offline => self.offline,
            CrawlerStatus::Error => self.error,
            CrawlerStatus::Maintenance => self.maintenance,
            CrawlerStatus::Unknown(_) => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.online + self.offline + self.error + self.maintenance
    }
}
