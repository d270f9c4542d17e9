//! Streaming download of a release artifact to disk.

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use crate::catalog::{Release, SelectorSchema};
use crate::http::HttpClient;
use crate::mirror::resolve_download_url;
use crate::runtime::Runtime;
use crate::site::FetchMarkup;

/// Downloads a release's artifact, returning the path it was written to.
///
/// The direct URL is resolved through the mirror page first. Destination
/// rules: an explicit file path is used as-is; an explicit directory gets
/// the release's own file name inside it; no destination at all means the
/// current working directory. On failure a partially written file is left in
/// place; cleaning it up is the caller's decision.
#[tracing::instrument(skip(runtime, site, http_client, schema, release, dest))]
pub async fn download_release<R: Runtime, S: FetchMarkup + ?Sized>(
    runtime: &R,
    site: &S,
    http_client: &HttpClient,
    schema: &SelectorSchema,
    release: &Release,
    dest: Option<&Path>,
) -> Result<PathBuf> {
    let dest_path = resolve_destination(runtime, release, dest)?;
    download_release_to(runtime, site, http_client, schema, release, &dest_path).await?;
    Ok(dest_path)
}

/// Downloads a release's artifact to an exact path.
#[tracing::instrument(skip(runtime, site, http_client, schema, release, dest_path))]
pub async fn download_release_to<R: Runtime, S: FetchMarkup + ?Sized>(
    runtime: &R,
    site: &S,
    http_client: &HttpClient,
    schema: &SelectorSchema,
    release: &Release,
    dest_path: &Path,
) -> Result<()> {
    let url = resolve_download_url(site, schema, &release.file_name).await?;

    info!("Downloading {} to {:?}...", release.file_name, dest_path);

    http_client
        .download_file(&url, dest_path, || {
            runtime
                .create_file(dest_path)
                .with_context(|| format!("Failed to create destination file at {:?}", dest_path))
        })
        .await?;

    info!("Download complete.");
    Ok(())
}

fn resolve_destination<R: Runtime>(
    runtime: &R,
    release: &Release,
    dest: Option<&Path>,
) -> Result<PathBuf> {
    match dest {
        Some(path) if runtime.is_dir(path) => Ok(path.join(&release.file_name)),
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(runtime.current_dir()?.join(&release.file_name)),
    }
}
