//! Orchestration of download -> installer invocation -> cleanup.

mod runner;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::catalog::{Release, SelectorSchema};
use crate::download::download_release_to;
use crate::error::InstallError;
use crate::http::HttpClient;
use crate::runtime::Runtime;
use crate::site::FetchMarkup;

pub use runner::{InstallerRunner, JavaRunner};

#[cfg(test)]
pub use runner::MockInstallerRunner;

/// Headless entry point inside the installer jar.
pub const SILENT_ENTRY_POINT: &str = "optifine.Installer";

/// GUI entry point inside the installer jar.
pub const INTERACTIVE_ENTRY_POINT: &str = "optifine.InstallerFrame";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    Silent,
    Interactive,
}

impl InstallMode {
    pub fn entry_point(self) -> &'static str {
        match self {
            InstallMode::Silent => SILENT_ENTRY_POINT,
            InstallMode::Interactive => INTERACTIVE_ENTRY_POINT,
        }
    }
}

pub struct Installer<R: Runtime, S: FetchMarkup, J: InstallerRunner> {
    pub runtime: R,
    pub site: S,
    pub http_client: HttpClient,
    pub runner: J,
    pub schema: SelectorSchema,
}

impl<R: Runtime, S: FetchMarkup, J: InstallerRunner> Installer<R, S, J> {
    #[tracing::instrument(skip(runtime, site, http_client, runner, schema))]
    pub fn new(
        runtime: R,
        site: S,
        http_client: HttpClient,
        runner: J,
        schema: SelectorSchema,
    ) -> Self {
        Self {
            runtime,
            site,
            http_client,
            runner,
            schema,
        }
    }

    /// Downloads the release and runs the headless installer entry point.
    #[tracing::instrument(skip(self, release))]
    pub async fn install(&self, release: &Release) -> Result<()> {
        self.run(release, InstallMode::Silent).await
    }

    /// Downloads the release and runs the interactive installer UI.
    #[tracing::instrument(skip(self, release))]
    pub async fn run_installer(&self, release: &Release) -> Result<()> {
        self.run(release, InstallMode::Interactive).await
    }

    /// The shared sequence: download to a temporary jar, invoke the
    /// installer, delete the jar. Every step's failure is terminal for this
    /// invocation (no retries), and the temporary jar is removed best-effort
    /// on every exit path.
    async fn run(&self, release: &Release, mode: InstallMode) -> Result<()> {
        let temp_path = self.runtime.temp_dir().join(format!(
            "{}_OptiFine_{}.jar",
            fastrand::u32(..),
            release.minecraft_version
        ));

        info!(
            "Downloading {} to temporary file {:?}...",
            release.file_name, temp_path
        );
        if let Err(e) = download_release_to(
            &self.runtime,
            &self.site,
            &self.http_client,
            &self.schema,
            release,
            &temp_path,
        )
        .await
        {
            debug!("Download failed, removing temporary file {:?}", temp_path);
            let _ = self.runtime.remove_file(&temp_path);
            return Err(e);
        }

        info!("Invoking installer ({:?}) for {}...", mode, release.file_name);
        let status = match self.runner.run(&temp_path, mode.entry_point()).await {
            Ok(status) => status,
            Err(e) => {
                debug!(
                    "Installer did not start, removing temporary file {:?}",
                    temp_path
                );
                let _ = self.runtime.remove_file(&temp_path);
                return Err(e);
            }
        };

        if !status.success() {
            debug!(
                "Installer exited with {}, removing temporary file {:?}",
                status, temp_path
            );
            let _ = self.runtime.remove_file(&temp_path);
            return Err(InstallError::NonZeroExit(status).into());
        }

        self.runtime
            .remove_file(&temp_path)
            .with_context(|| format!("Failed to clean up temporary file: {:?}", temp_path))?;

        info!("Installed {}.", release.file_name);
        Ok(())
    }
}
