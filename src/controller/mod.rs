//! Crawler list controller
//!
//! The controller owns the client-side view of the fleet:
//! - The collection from the last successful fetch
//! - The search term and status filter
//! - The record selected in the configuration form and in the details view
//!
//! Mutating actions (edit, pause-toggle, archive) go through the
//! `CrawlerService`, and each successful one is followed by an explicit
//! `refresh()`. Records are never patched locally; the backend is the only
//! source of truth. Failures are logged, kept as an operator-visible notice and
//! returned to the caller.

mod guard;

pub use guard::Action;

use crate::fleet::{
    CrawlerEdit, CrawlerId, CrawlerInstance, EditField, FleetQuery, StatusCounts, StatusFilter,
};
use crate::service::CrawlerService;
use crate::state::RunState;
use crate::{FleetError, Result};
use chrono::{DateTime, Utc};
use guard::InFlight;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct FleetView {
    crawlers: Vec<CrawlerInstance>,
    query: FleetQuery,
    editing: Option<CrawlerEdit>,
    details: Option<CrawlerId>,
    last_error: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
    /// Ticket of the fetch the collection came from
    generation: u64,
}

impl FleetView {
    fn find(&self, id: &CrawlerId) -> Option<&CrawlerInstance> {
        self.crawlers.iter().find(|c| &c.id == id)
    }
}

/// Client-side controller for the crawler fleet
pub struct FleetController<S> {
    service: S,
    view: Mutex<FleetView>,
    in_flight: InFlight,
    fetches: AtomicU64,
}

impl<S: CrawlerService> FleetController<S> {
    /// Creates a controller with an empty collection; call `mount()` to load it
    pub fn new(service: S) -> Self {
        Self::with_query(service, FleetQuery::default())
    }

    /// Creates a controller with an initial search term and status filter
    pub fn with_query(service: S, query: FleetQuery) -> Self {
        Self {
            service,
            view: Mutex::new(FleetView {
                query,
                ..FleetView::default()
            }),
            in_flight: InFlight::default(),
            fetches: AtomicU64::new(0),
        }
    }

    fn view(&self) -> MutexGuard<'_, FleetView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Loading =====

    /// Initial load of the fleet
    pub async fn mount(&self) -> Result<usize> {
        tracing::info!("Loading crawler fleet");
        self.refresh().await
    }

    /// Re-fetches the whole collection and replaces it
    ///
    /// Query, form and details selections are kept. On failure the previous
    /// collection stays in place. Overlapping refreshes are ordered by when
    /// they started: a fetch that completes after a newer one has already been
    /// applied is discarded, and the size of the current collection is returned.
    pub async fn refresh(&self) -> Result<usize> {
        let ticket = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let fetched = self.service.fetch_all().await;

        match fetched {
            Ok(crawlers) => {
                let count = crawlers.len();
                let mut view = self.view();
                if ticket < view.generation {
                    tracing::debug!(
                        "Discarding fleet fetch #{}; #{} is already applied",
                        ticket,
                        view.generation
                    );
                    return Ok(view.crawlers.len());
                }
                view.generation = ticket;
                view.crawlers = crawlers;
                view.refreshed_at = Some(Utc::now());
                view.last_error = None;
                tracing::debug!("Fleet view holds {} crawlers", count);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to fetch crawler fleet: {}", e);
                Err(self.notice(format!("Could not load crawlers: {}", e), e.into()))
            }
        }
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.view().refreshed_at
    }

    // ===== Query state =====

    pub fn set_search(&self, term: impl Into<String>) {
        self.view().query.search = term.into();
    }

    pub fn set_status_filter(&self, filter: StatusFilter) {
        self.view().query.status = filter;
    }

    pub fn query(&self) -> FleetQuery {
        self.view().query.clone()
    }

    /// Every record from the last fetch, unfiltered
    pub fn crawlers(&self) -> Vec<CrawlerInstance> {
        self.view().crawlers.clone()
    }

    /// Records passing the current search term and status filter
    pub fn visible(&self) -> Vec<CrawlerInstance> {
        let view = self.view();
        let visible = view.query.apply(&view.crawlers).into_iter().cloned().collect();
        visible
    }

    /// Status counters over the full, unfiltered collection
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::from_crawlers(&self.view().crawlers)
    }

    pub fn find(&self, id: &CrawlerId) -> Option<CrawlerInstance> {
        self.view().find(id).cloned()
    }

    fn require(&self, id: &CrawlerId) -> Result<CrawlerInstance> {
        self.find(id).ok_or_else(|| FleetError::UnknownCrawler { id: id.to_string() })
    }

    // ===== Configuration form =====

    /// Opens the configuration form pre-populated from the record
    pub fn open_edit(&self, id: &CrawlerId) -> Result<CrawlerEdit> {
        let crawler = self.require(id)?;
        let edit = CrawlerEdit::from_record(&crawler);
        self.view().editing = Some(edit.clone());
        Ok(edit)
    }

    pub fn edit_form(&self) -> Option<CrawlerEdit> {
        self.view().editing.clone()
    }

    /// Updates one field of the open form from operator input
    pub fn set_edit_field(&self, field: EditField, raw: &str) -> Result<()> {
        let mut view = self.view();
        let edit = view.editing.as_mut().ok_or(FleetError::NoEditInProgress)?;
        edit.set(field, raw)
    }

    /// Closes the form, discarding its contents
    pub fn cancel_edit(&self) {
        self.view().editing = None;
    }

    /// Sends the whole form as one save request
    ///
    /// On success the form closes and the fleet is refreshed. On failure the
    /// form stays open with its contents so the operator can retry.
    pub async fn submit_edit(&self) -> Result<()> {
        let edit = self.edit_form().ok_or(FleetError::NoEditInProgress)?;
        if let Err(e) = edit.validate() {
            return Err(self.notice(e.to_string(), e));
        }

        let _guard = self.in_flight.begin(&edit.id, Action::Edit)?;
        let saved = self.service.save_config(&edit).await;
        if let Err(e) = saved {
            return Err(self.action_failed(Action::Edit, &edit.id, e.into()));
        }

        tracing::info!("Saved configuration for crawler {}", edit.id);
        {
            let mut view = self.view();
            if view.editing.as_ref().is_some_and(|open| open.id == edit.id) {
                view.editing = None;
            }
        }
        self.refresh().await?;
        Ok(())
    }

    // ===== Details view =====

    pub fn open_details(&self, id: &CrawlerId) -> Result<CrawlerInstance> {
        let crawler = self.require(id)?;
        self.view().details = Some(crawler.id.clone());
        Ok(crawler)
    }

    pub fn close_details(&self) {
        self.view().details = None;
    }

    /// The record shown in the details view, as of the last fetch
    pub fn details(&self) -> Option<CrawlerInstance> {
        let view = self.view();
        let shown = view.details.as_ref().and_then(|id| view.find(id)).cloned();
        shown
    }

    // ===== Run-state actions =====

    /// Returns true if the archive action should be offered for this record
    pub fn archive_available(&self, id: &CrawlerId) -> bool {
        self.find(id)
            .is_some_and(|crawler| RunState::of(&crawler).can_archive())
    }

    /// Returns true while the action on this record awaits its result;
    /// the triggering control should be disabled meanwhile
    pub fn is_pending(&self, id: &CrawlerId, action: Action) -> bool {
        self.in_flight.contains(id, action)
    }

    /// Sends a pause-toggle request, then refreshes
    pub async fn toggle_pause(&self, id: &CrawlerId) -> Result<()> {
        let crawler = self.require(id)?;
        let _guard = self.in_flight.begin(&crawler.id, Action::TogglePause)?;

        // TODO: confirm whether /crawler/pause expects the target value; the
        // record's current value is sent and the backend does the toggling.
        let sent = self
            .service
            .toggle_pause(&crawler.id, crawler.pause)
            .await;
        if let Err(e) = sent {
            return Err(self.action_failed(Action::TogglePause, &crawler.id, e.into()));
        }

        tracing::info!(
            "Pause toggle sent for crawler {} (was {})",
            crawler.id,
            RunState::of(&crawler)
        );
        self.refresh().await?;
        Ok(())
    }

    /// Requests packaging of a paused, not yet archived crawler's output
    pub async fn request_archive(&self, id: &CrawlerId) -> Result<()> {
        let crawler = self.require(id)?;
        if !RunState::of(&crawler).can_archive() {
            let e = FleetError::ArchiveUnavailable {
                id: crawler.id.to_string(),
            };
            tracing::warn!("{}", e);
            return Err(self.notice(e.to_string(), e));
        }

        let _guard = self.in_flight.begin(&crawler.id, Action::Archive)?;
        let requested = self.service.request_archive(&crawler.id).await;
        if let Err(e) = requested {
            return Err(self.action_failed(Action::Archive, &crawler.id, e.into()));
        }

        tracing::info!("Archive requested for crawler {}", crawler.id);
        self.refresh().await?;
        Ok(())
    }

    // ===== Operator notices =====

    /// The most recent failure, until dismissed or cleared by a successful fetch
    pub fn last_error(&self) -> Option<String> {
        self.view().last_error.clone()
    }

    pub fn dismiss_error(&self) {
        self.view().last_error = None;
    }

    fn action_failed(&self, action: Action, id: &CrawlerId, error: FleetError) -> FleetError {
        tracing::error!("{} failed for crawler {}: {}", action, id, error);
        self.notice(format!("{} failed for crawler {}: {}", action, id, error), error)
    }

    fn notice(&self, message: String, error: FleetError) -> FleetError {
        self.view().last_error = Some(message);
        error
    }
}
