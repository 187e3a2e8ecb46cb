//! Per-action in-flight tracking
//!
//! A mutating action holds an `InFlightGuard` from the moment it is issued
//! until its result (success or error) has been handled. While the guard is
//! alive the same action on the same crawler is refused.

use crate::fleet::CrawlerId;
use crate::FleetError;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mutating actions an operator can trigger on a crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Edit,
    TogglePause,
    Archive,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::TogglePause => "pause-toggle",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
pub(crate) struct InFlight {
    pending: Mutex<HashSet<(CrawlerId, Action)>>,
}

impl InFlight {
    fn pending(&self) -> MutexGuard<'_, HashSet<(CrawlerId, Action)>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the action as pending, or fails if it already is
    pub(crate) fn begin(&self, id: &CrawlerId, action: Action) -> Result<InFlightGuard<'_>, FleetError> {
        let key = (id.clone(), action);
        if !self.pending().insert(key.clone()) {
            return Err(FleetError::ActionInFlight {
                id: id.to_string(),
                action,
            });
        }
        Ok(InFlightGuard { owner: self, key })
    }

    pub(crate) fn contains(&self, id: &CrawlerId, action: Action) -> bool {
        self.pending().contains(&(id.clone(), action))
    }
}

/// Clears the pending mark when dropped
#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    owner: &'a InFlight,
    key: (CrawlerId, Action),
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.pending().remove(&self.key);
    }
}
