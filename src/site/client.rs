use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;

/// Production base URL of the download site.
pub const DEFAULT_BASE_URL: &str = "https://optifine.net";

/// Path of the catalog page listing every release.
const DOWNLOADS_PATH: &str = "/downloads";

/// Path of the interstitial page that hides the direct download link.
/// The file identifier travels in the `f` query parameter.
const MIRROR_PATH: &str = "/adloadx";

/// Fetches raw markup from the download site. One GET per call, no retries:
/// a failed fetch surfaces as a `TransportError` from the HTTP client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchMarkup: Send + Sync {
    /// Markup of the catalog page enumerating all releases.
    async fn catalog_markup(&self) -> Result<String>;

    /// Markup of the mirror page for one file identifier.
    async fn mirror_markup(&self, file_name: &str) -> Result<String>;

    fn base_url(&self) -> &str;
}

pub struct OptiFineSite {
    http: HttpClient,
    base_url: String,
}

impl OptiFineSite {
    #[tracing::instrument(skip(http, base_url))]
    pub fn new(http: HttpClient, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { http, base_url }
    }
}

#[async_trait]
impl FetchMarkup for OptiFineSite {
    #[tracing::instrument(skip(self))]
    async fn catalog_markup(&self) -> Result<String> {
        let url = format!("{}{}", self.base_url, DOWNLOADS_PATH);
        debug!("Fetching catalog from {}...", url);
        self.http.get_text(&url).await
    }

    #[tracing::instrument(skip(self))]
    async fn mirror_markup(&self, file_name: &str) -> Result<String> {
        let url = format!("{}{}?f={}", self.base_url, MIRROR_PATH, file_name);
        debug!("Fetching mirror page from {}...", url);
        self.http.get_text(&url).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
