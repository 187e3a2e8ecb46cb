//! HTTP transport for the control API
//!
//! Every request carries the same fixed header set and no credentials. Each
//! call is attempted once; failures are classified and returned to the caller.

use crate::api::Environment;
use crate::config::ApiConfig;
use crate::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Builds the header set attached to every request
///
/// `locale: pt-br`, `accept: */*`, `content-type: application/json`,
/// regardless of method or payload.
pub fn fixed_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("locale"),
        HeaderValue::from_static("pt-br"),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Builds an HTTP client with the fixed headers and configured timeouts
///
/// # Arguments
///
/// * `config` - Transport settings; absent timeouts leave the request unbounded
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .default_headers(fixed_headers())
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }

    if let Some(timeout) = config.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }

    builder.build()
}

/// Client for the crawler control API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the backend selected at build time
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Self::with_base_url(Environment::current().base_url(), config)
    }

    /// Creates a client for an explicit origin
    ///
    /// # Example
    ///
    /// ```no_run
    /// use crawler_fleet::api::ApiClient;
    /// use crawler_fleet::config::ApiConfig;
    ///
    /// let client = ApiClient::with_base_url("http://localhost:8085", &ApiConfig::default()).unwrap();
    /// assert_eq!(client.base_url().as_str(), "http://localhost:8085/");
    /// ```
    pub fn with_base_url(base_url: &str, config: &ApiConfig) -> ApiResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL '{}': {}", base_url, e)))?;

        // Paths are joined relative to the base, so it must end in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = build_http_client(config).map_err(|e| {
            ApiError::InvalidRequest(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidRequest(format!("invalid path '{}': {}", path, e)))
    }

    /// Sends a GET request and decodes the JSON response
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let request = self.http.get(url.clone());
        self.execute(url, request).await
    }

    /// Sends a POST request with a JSON body and decodes the JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);

        let payload = serde_json::to_vec(body)
            .map_err(|e| ApiError::InvalidRequest(format!("failed to encode body: {}", e)))?;
        let request = self.http.post(url.clone()).body(payload);
        self.execute(url, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        url: Url,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let url = url.to_string();

        let response = request
            .send()
            .await
            .map_err(|e| classify_transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} answered HTTP {}", url, status.as_u16());
            return Err(ApiError::Http {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(&url, e))?;

        decode_body(&url, &body)
    }
}

/// Decodes a response body; an empty body decodes as JSON `null`
fn decode_body<T: DeserializeOwned>(url: &str, body: &[u8]) -> ApiResult<T> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };

    serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Maps a reqwest failure onto the API error taxonomy
fn classify_transport_error(url: &str, error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_decode() {
        ApiError::Decode {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else if error.is_builder() {
        ApiError::InvalidRequest(error.to_string())
    } else {
        ApiError::NetworkUnavailable {
            url: url.to_string(),
            source: error,
        }
    }
}
