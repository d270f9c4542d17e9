//! Resolution of direct download URLs through the mirror page.
//!
//! The site never serves direct artifact links from the catalog; each one is
//! hidden behind an interstitial page keyed by the file identifier, and the
//! revealed link may change between visits. Resolution is therefore repeated
//! per download and never cached.

use anyhow::Result;
use log::debug;
use scraper::Html;

use crate::catalog::SelectorSchema;
use crate::error::ResolutionError;
use crate::site::FetchMarkup;

/// Fetches the mirror page for `file_name` and returns the absolute
/// download URL behind its single download anchor.
///
/// Fails with [`ResolutionError`] when the anchor is absent (e.g. the
/// identifier is no longer valid) and propagates transport failures from the
/// page fetch.
#[tracing::instrument(skip(site, schema))]
pub async fn resolve_download_url<S: FetchMarkup + ?Sized>(
    site: &S,
    schema: &SelectorSchema,
    file_name: &str,
) -> Result<String> {
    let markup = site.mirror_markup(file_name).await?;

    let href = download_href(&markup, schema).ok_or_else(|| {
        ResolutionError::MissingDownloadAnchor {
            file_name: file_name.to_string(),
        }
    })?;

    let url = format!(
        "{}/{}",
        site.base_url().trim_end_matches('/'),
        href.trim_start_matches('/')
    );
    debug!("Resolved {} -> {}", file_name, url);

    Ok(url)
}

fn download_href(markup: &str, schema: &SelectorSchema) -> Option<String> {
    let document = Html::parse_document(markup);
    document
        .select(&schema.download_anchor)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .map(|href| href.to_string())
}
