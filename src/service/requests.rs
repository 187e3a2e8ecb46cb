use crate::fleet::wire::string_bool;
use crate::fleet::CrawlerId;
use serde::{Deserialize, Serialize};

/// Body of a pause-toggle request: `{id, pause}`
#[derive(Debug, Clone, Serialize)]
pub struct PauseRequest<'a> {
    pub id: &'a CrawlerId,
    #[serde(with = "string_bool")]
    pub pause: bool,
}

/// Body of an archive request: `{id}`
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveRequest<'a> {
    pub id: &'a CrawlerId,
}

/// Whatever the backend answered to a mutating call
///
/// The backend does not document its acknowledgements; the raw JSON is kept
/// (`null` for an empty body).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Acknowledgement(pub serde_json::Value);
