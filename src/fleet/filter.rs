use crate::fleet::model::{CrawlerInstance, CrawlerStatus};
use std::fmt;
use std::str::FromStr;

/// Status selector of the fleet list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Only records with exactly this (known) status
    Only(CrawlerStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: &CrawlerStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" {
            return Ok(Self::All);
        }
        CrawlerStatus::from_known(s).map(Self::Only).ok_or_else(|| {
            format!(
                "unknown status filter '{}' (expected all, online, offline, error or maintenance)",
                s
            )
        })
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => write!(f, "{}", status),
        }
    }
}

/// Search term plus status filter
///
/// A record is visible when the term is empty or found (case-insensitive
/// substring) in its name, location or city, and its status passes the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl FleetQuery {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    pub fn matches(&self, crawler: &CrawlerInstance) -> bool {
        self.matches_search(crawler) && self.status.matches(&crawler.status)
    }

    fn matches_search(&self, crawler: &CrawlerInstance) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(crawler.name.as_str())
            || crawler.location.as_deref().is_some_and(contains)
            || contains(crawler.cidade.as_str())
    }

    /// Returns the visible records, in collection order
    pub fn apply<'a>(&self, crawlers: &'a [CrawlerInstance]) -> Vec<&'a CrawlerInstance> {
        crawlers.iter().filter(|c| self.matches(c)).collect()
    }
}
