//! HTTP client wrapper shared by both game sources.
//!
//! This module provides the `HttpClient` struct which applies the project's
//! User-Agent and timeout policy and maps transport failures to
//! [`DownloadError`].

use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use crate::user_agent;

/// HTTP client for talking to the game servers.
///
/// This client is designed to be created once and reused for every request of
/// a download, taking advantage of connection pooling. Requests are issued one
/// at a time by the pipelines.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes
    /// - Gzip decompression: enabled
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, DownloadError> {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::new`].
    #[instrument(level = "debug")]
    pub fn new_with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Fetches `url` and decodes its JSON body.
    ///
    /// # Errors
    ///
    /// Returns a transport [`DownloadError`] for connection failures,
    /// timeouts, non-success statuses and bodies that are not the expected
    /// JSON document.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DownloadError> {
        let response = self.get(url, Some("application/json")).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        serde_json::from_str(&body).map_err(|e| DownloadError::decode(url, e))
    }

    /// Sends a GET request and returns the response once its status is known
    /// to be successful. The body has not been read yet.
    ///
    /// # Errors
    ///
    /// Returns a transport [`DownloadError`] for connection failures,
    /// timeouts and non-success statuses.
    pub async fn get(
        &self,
        url: &str,
        accept: Option<&str>,
    ) -> Result<reqwest::Response, DownloadError> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}
