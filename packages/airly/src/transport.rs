//! The HTTP seam between [`AirlyConnector`](crate::AirlyConnector) and the
//! network.
//!
//! [`HttpFetcher`] performs one GET and hands back the status and raw body
//! without interpreting either. [`ReqwestFetcher`] is the real
//! implementation; tests substitute canned responses.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{AirlyConfig, AirlyError};

/// Raw outcome of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

/// Performs GET requests against a fixed API root.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetches `path` (relative to the API root, including any query
    /// string) with the given extra headers.
    ///
    /// Only transport failures are errors; every HTTP status, 4xx and 5xx
    /// included, comes back as a [`FetchResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`AirlyError::Http`] if no response could be obtained.
    async fn get(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<FetchResponse, AirlyError>;
}

/// [`HttpFetcher`] backed by a shared [`reqwest::Client`].
pub struct ReqwestFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher for the API root in `config`.
    #[must_use]
    pub fn new(config: &AirlyConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<FetchResponse, AirlyError> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url}");

        let mut request = self.client.get(&url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        log::debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(FetchResponse { status, body })
    }
}
