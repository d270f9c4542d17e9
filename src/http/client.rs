//! Thin HTTP client over one shared `reqwest::Client`.
//!
//! There is deliberately no retry and no timeout handling here: every
//! failure propagates to the caller on the first attempt, and callers that
//! need resilience wrap these calls themselves.

use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::io::Write;
use std::path::Path;

use crate::error::{DownloadError, TransportError};

/// HTTP client shared by every component that touches the network.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and returns the response body as text.
    /// Fails with [`TransportError`] on send failure or non-success status.
    #[tracing::instrument(skip(self))]
    pub async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TransportError {
                url: url.to_string(),
                source,
            })?;

        let response = response
            .error_for_status()
            .map_err(|source| TransportError {
                url: url.to_string(),
                source,
            })?;

        let body = response.text().await.map_err(|source| TransportError {
            url: url.to_string(),
            source,
        })?;

        Ok(body)
    }

    /// Streams a GET response body into the writer produced by
    /// `create_writer`. The writer is only created once the response headers
    /// have arrived successfully. Completion is reported only after the
    /// writer has consumed and flushed the full body.
    ///
    /// Fails with [`DownloadError`]; whatever was already written to the
    /// sink is left as-is.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(
        &self,
        url: &str,
        dest: &Path,
        create_writer: F,
    ) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        debug!("Downloading file from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DownloadError::Transfer {
                url: url.to_string(),
                source,
            })?;

        let mut response =
            response
                .error_for_status()
                .map_err(|source| DownloadError::Transfer {
                    url: url.to_string(),
                    source,
                })?;

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) =
            response
                .chunk()
                .await
                .map_err(|source| DownloadError::Transfer {
                    url: url.to_string(),
                    source,
                })?
        {
            writer
                .write_all(&chunk)
                .map_err(|source| DownloadError::Sink {
                    path: dest.to_path_buf(),
                    source,
                })?;
            downloaded_bytes += chunk.len() as u64;
        }

        writer.flush().map_err(|source| DownloadError::Sink {
            path: dest.to_path_buf(),
            source,
        })?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}
