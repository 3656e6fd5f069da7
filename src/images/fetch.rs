//! Image retrieval.
//!
//! The resolver only depends on the [`ImageFetcher`] trait; [`HttpImageFetcher`]
//! is the default network-backed implementation (feature `http`).

use bytes::Bytes;
use std::future::Future;
use thiserror::Error;

/// Raw image payload returned by a fetcher.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Bytes,
    /// Declared `Content-Type`, if the source provided one.
    pub content_type: Option<String>,
}

/// Error types for a single image fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Source of image bytes keyed by URL.
///
/// Implementations must not impose a timeout of their own beyond what the
/// underlying transport does by default.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedImage, FetchError>> + Send;
}

/// Fetches images over HTTP(S) with a shared `reqwest` client.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxy, user agent, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}
