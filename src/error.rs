//! Typed error values for each failure class of the pipeline.
//!
//! Every operation returns `anyhow::Result`; these types travel inside the
//! `anyhow::Error` so callers can downcast to the failure class they care
//! about. Nothing here is retried: each error is terminal for the call that
//! produced it.

use std::path::PathBuf;
use std::process::ExitStatus;

/// An HTTP fetch of the catalog or mirror page failed (send error or
/// non-success status). The underlying client error is propagated, not
/// reinterpreted.
#[derive(Debug)]
pub struct TransportError {
    pub url: String,
    pub source: reqwest::Error,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Request to {} failed: {}", self.url, self.source)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// A catalog row did not match the expected markup structure.
///
/// Surfaced per row: the extractor skips the offending row with a diagnostic
/// instead of failing the whole catalog.
#[derive(Debug)]
pub enum ExtractionError {
    /// Row has no mirror anchor, so no file name can be derived.
    MissingMirrorLink { row: usize },
    /// A required cell or attribute was absent.
    MissingField { row: usize, field: &'static str },
    /// The file name does not contain the version marker and a following
    /// separator, so no Minecraft version can be sliced out of it.
    MissingVersionMarker { file_name: String },
    /// The date cell did not parse as day.month.year.
    InvalidDate { row: usize, text: String },
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::MissingMirrorLink { row } => {
                write!(f, "Row {} has no mirror link", row)
            }
            ExtractionError::MissingField { row, field } => {
                write!(f, "Row {} is missing the {} field", row, field)
            }
            ExtractionError::MissingVersionMarker { file_name } => {
                write!(
                    f,
                    "File name {:?} does not contain a Minecraft version",
                    file_name
                )
            }
            ExtractionError::InvalidDate { row, text } => {
                write!(f, "Row {} has an unparsable date {:?}", row, text)
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

/// The mirror page did not contain the expected download anchor, e.g. when
/// the file identifier is no longer valid.
#[derive(Debug)]
pub enum ResolutionError {
    MissingDownloadAnchor { file_name: String },
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionError::MissingDownloadAnchor { file_name } => {
                write!(f, "Mirror page for {:?} has no download link", file_name)
            }
        }
    }
}

impl std::error::Error for ResolutionError {}

/// The artifact transfer failed mid-stream. The partially written
/// destination file is left in place.
#[derive(Debug)]
pub enum DownloadError {
    /// The request or response body failed.
    Transfer { url: String, source: reqwest::Error },
    /// Writing to the destination sink failed.
    Sink {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadError::Transfer { url, source } => {
                write!(f, "Download from {} failed: {}", url, source)
            }
            DownloadError::Sink { path, source } => {
                write!(f, "Writing to {:?} failed: {}", path, source)
            }
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Transfer { source, .. } => Some(source),
            DownloadError::Sink { source, .. } => Some(source),
        }
    }
}

/// The installer subprocess failed to start or reported failure.
#[derive(Debug)]
pub enum InstallError {
    Spawn(std::io::Error),
    NonZeroExit(ExitStatus),
}

impl std::fmt::Display for InstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallError::Spawn(e) => {
                write!(f, "Failed to start the installer process: {}", e)
            }
            InstallError::NonZeroExit(status) => {
                write!(f, "Installer exited with failure status: {}", status)
            }
        }
    }
}

impl std::error::Error for InstallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstallError::Spawn(e) => Some(e),
            InstallError::NonZeroExit(_) => None,
        }
    }
}
