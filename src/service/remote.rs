use crate::api::ApiClient;
use crate::fleet::{CrawlerEdit, CrawlerId, CrawlerInstance};
use crate::service::{Acknowledgement, ArchiveRequest, CrawlerService, PauseRequest};
use crate::ApiResult;
use async_trait::async_trait;

pub const LIST_PATH: &str = "/crawler";
pub const EDIT_PATH: &str = "/crawler/edit";
pub const PAUSE_PATH: &str = "/crawler/pause";
pub const ARCHIVE_PATH: &str = "/crawler/generate-zip";

/// `CrawlerService` backed by the control API
#[derive(Debug, Clone)]
pub struct RemoteCrawlerService {
    client: ApiClient,
}

impl RemoteCrawlerService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl CrawlerService for RemoteCrawlerService {
    async fn fetch_all(&self) -> ApiResult<Vec<CrawlerInstance>> {
        let crawlers: Vec<CrawlerInstance> = self.client.get(LIST_PATH).await?;
        tracing::debug!("Fetched {} crawler records", crawlers.len());
        Ok(crawlers)
    }

    async fn save_config(&self, edit: &CrawlerEdit) -> ApiResult<Acknowledgement> {
        tracing::debug!("Saving configuration for crawler {}", edit.id);
        self.client.post(EDIT_PATH, edit).await
    }

    async fn toggle_pause(&self, id: &CrawlerId, pause: bool) -> ApiResult<Acknowledgement> {
        tracing::debug!("Sending pause toggle for crawler {} (pause={})", id, pause);
        self.client.post(PAUSE_PATH, &PauseRequest { id, pause }).await
    }

    async fn request_archive(&self, id: &CrawlerId) -> ApiResult<Acknowledgement> {
        tracing::debug!("Requesting archive for crawler {}", id);
        self.client.post(ARCHIVE_PATH, &ArchiveRequest { id }).await
    }
}
