//! Crawler service facade
//!
//! Four remote operations, each mapping onto exactly one control API call.
//! Every operation returns a `Result`; a failed call never masquerades as a
//! payload.

mod remote;
mod requests;

pub use remote::{RemoteCrawlerService, ARCHIVE_PATH, EDIT_PATH, LIST_PATH, PAUSE_PATH};
pub use requests::{Acknowledgement, ArchiveRequest, PauseRequest};

use crate::fleet::{CrawlerEdit, CrawlerId, CrawlerInstance};
use crate::ApiResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote operations the fleet controller depends on
#[async_trait]
pub trait CrawlerService: Send + Sync {
    /// Fetches the complete fleet
    async fn fetch_all(&self) -> ApiResult<Vec<CrawlerInstance>>;

    /// Replaces a crawler's editable configuration in one call
    async fn save_config(&self, edit: &CrawlerEdit) -> ApiResult<Acknowledgement>;

    /// Sends a pause-toggle request carrying the given pause value
    async fn toggle_pause(&self, id: &CrawlerId, pause: bool) -> ApiResult<Acknowledgement>;

    /// Asks the backend to package the crawler's output
    async fn request_archive(&self, id: &CrawlerId) -> ApiResult<Acknowledgement>;
}

#[async_trait]
impl<S: CrawlerService + ?Sized> CrawlerService for Arc<S> {
    async fn fetch_all(&self) -> ApiResult<Vec<CrawlerInstance>> {
        (**self).fetch_all().await
    }

    async fn save_config(&self, edit: &CrawlerEdit) -> ApiResult<Acknowledgement> {
        (**self).save_config(edit).await
    }

    async fn toggle_pause(&self, id: &CrawlerId, pause: bool) -> ApiResult<Acknowledgement> {
        (**self).toggle_pause(id, pause).await
    }

    async fn request_archive(&self, id: &CrawlerId) -> ApiResult<Acknowledgement> {
        (**self).request_archive(id).await
    }
}
