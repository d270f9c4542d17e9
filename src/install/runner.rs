use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::path::Path;
use std::process::ExitStatus;
use tokio::process::Command;

use crate::error::InstallError;

/// Abstract capability to invoke the external installer program on a
/// downloaded jar. The concrete subprocess mechanism stays behind this seam
/// so orchestration can be tested without a Java runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstallerRunner: Send + Sync {
    /// Runs the installer entry point with the jar on the class path and
    /// waits for it to exit. Fails with [`InstallError::Spawn`] when the
    /// process cannot be started at all.
    async fn run(&self, jar_path: &Path, entry_point: &str) -> Result<ExitStatus>;
}

/// Spawns `java -cp <jar> <entry_point>` and waits for it.
pub struct JavaRunner {
    program: String,
}

impl JavaRunner {
    pub fn new() -> Self {
        Self {
            program: "java".to_string(),
        }
    }

    /// Uses another executable in place of `java`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for JavaRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InstallerRunner for JavaRunner {
    #[tracing::instrument(skip(self, jar_path))]
    async fn run(&self, jar_path: &Path, entry_point: &str) -> Result<ExitStatus> {
        info!(
            "Running {} -cp {:?} {}...",
            self.program, jar_path, entry_point
        );

        let status = Command::new(&self.program)
            .arg("-cp")
            .arg(jar_path)
            .arg(entry_point)
            .status()
            .await
            .map_err(InstallError::Spawn)?;

        Ok(status)
    }
}
