/// Crawler record definitions as reported by the control API
use crate::fleet::wire::{self, string_bool};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque identifier as sent by the backend
///
/// The backend is free to use numbers or strings; the original form is kept
/// so it can be echoed back unchanged. Two ids are equal when their textual
/// forms are equal, so `7` and `"7"` name the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpaqueId {
    Number(i64),
    Text(String),
}

pub type CrawlerId = OpaqueId;
pub type PageId = OpaqueId;

impl OpaqueId {
    /// Returns the textual form of the id
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl PartialEq for OpaqueId {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for OpaqueId {}

impl Hash for OpaqueId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl From<&str> for OpaqueId {
    fn from(raw: &str) -> Self {
        Self::Text(raw.to_string())
    }
}

impl From<i64> for OpaqueId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// Reported health of a crawler
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CrawlerStatus {
    Online,
    Offline,
    Error,
    Maintenance,
    /// Any value the dashboard does not recognize; kept verbatim
    Unknown(String),
}

impl CrawlerStatus {
    /// The four statuses the dashboard tracks
    pub const KNOWN: [CrawlerStatus; 4] = [
        CrawlerStatus::Online,
        CrawlerStatus::Offline,
        CrawlerStatus::Error,
        CrawlerStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Error => "error",
            Self::Maintenance => "maintenance",
            Self::Unknown(raw) => raw,
        }
    }

    /// Parses one of the four known statuses; anything else is `None`
    pub fn from_known(raw: &str) -> Option<Self> {
        match raw {
            "online" => Some(Self::Online),
            "offline" => Some(Self::Offline),
            "error" => Some(Self::Error),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Default for CrawlerStatus {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for CrawlerStatus {
    fn from(raw: String) -> Self {
        Self::from_known(&raw).unwrap_or(Self::Unknown(raw))
    }
}

impl From<CrawlerStatus> for String {
    fn from(status: CrawlerStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for CrawlerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collected data volume, held in megabytes
///
/// The backend reports this counter under the `gbs` key, but the value has
/// always been a megabyte count. Conversions happen here; the unit label is
/// only attached when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DataSize(f64);

impl DataSize {
    pub fn from_megabytes(mb: f64) -> Self {
        Self(mb)
    }

    pub fn megabytes(&self) -> f64 {
        self.0
    }

    pub fn gigabytes(&self) -> f64 {
        self.0 / 1024.0
    }
}

impl<'de> Deserialize<'de> for DataSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        wire::lenient_f64(deserializer).map(Self)
    }
}

/// An output artifact the crawler has written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedFile {
    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub name: String,
}

impl ConsolidatedFile {
    const SUFFIX: &'static str = "-consolidated.json";

    /// File name without the `-consolidated.json` suffix
    pub fn display_name(&self) -> &str {
        self.name.strip_suffix(Self::SUFFIX).unwrap_or(&self.name)
    }
}

/// Processing outcome for a single page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOutcome {
    pub id: PageId,
    #[serde(deserialize_with = "wire::lenient_int", default)]
    pub state: i64,
}

impl PageOutcome {
    pub fn succeeded(&self) -> bool {
        self.state == 1
    }
}

/// One scraping worker's reported state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlerInstance {
    pub id: CrawlerId,

    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub name: String,

    /// Missing, `null` or non-string values decode as `Unknown`
    #[serde(deserialize_with = "wire::lenient_status", default)]
    pub status: CrawlerStatus,

    /// Free-form location label; some backends send it alongside `cidade`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    // ===== Target entity =====
    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub cidade: String,

    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub codigo_municipio: String,

    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub codigo_entidade: String,

    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub nome_entidade: String,

    #[serde(deserialize_with = "wire::lenient_int", default)]
    pub ano: i64,

    // ===== Page range and cursor =====
    #[serde(deserialize_with = "wire::lenient_int", default)]
    pub pagina_inicial: i64,

    #[serde(deserialize_with = "wire::lenient_int", default)]
    pub pagina_final: i64,

    #[serde(deserialize_with = "wire::lenient_int", default)]
    pub pagina_atual: i64,

    // ===== Resources =====
    #[serde(deserialize_with = "wire::lenient_int", default)]
    pub cpu: i64,

    #[serde(deserialize_with = "wire::lenient_int", default)]
    pub memory: i64,

    #[serde(rename = "gbs", default)]
    pub data: DataSize,

    // ===== Run flags =====
    #[serde(with = "string_bool", default)]
    pub pause: bool,

    #[serde(with = "string_bool", default)]
    pub send_file: bool,

    // ===== Session credentials (opaque, not validated) =====
    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub cookie_session: String,

    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub session_token: String,

    #[serde(deserialize_with = "wire::lenient_string", default)]
    pub user_session_token: String,

    #[serde(deserialize_with = "wire::null_as_default", default)]
    pub files_consolidateds: Vec<ConsolidatedFile>,

    #[serde(deserialize_with = "wire::null_as_default", default)]
    pub paginas: Vec<PageOutcome>,
}
