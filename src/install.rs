//! Dependency installation
//!
//! Runs the project's package manager after files are generated. A skipped request
//! still goes through the installer so every run takes the same path, but it
//! resolves immediately without starting a process.

use crate::error::ScaffoldError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub project_dir: PathBuf,
    pub skip_install: bool,
}

#[async_trait]
pub trait DependencyInstaller: Send + Sync {
    async fn install(&self, request: InstallRequest) -> Result<(), ScaffoldError>;
}

/// Runs `<program> install` in the project directory
#[derive(Debug, Clone)]
pub struct PackageManagerInstaller {
    program: String,
}

impl PackageManagerInstaller {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for PackageManagerInstaller {
    fn default() -> Self {
        Self::new("npm")
    }
}

#[async_trait]
impl DependencyInstaller for PackageManagerInstaller {
    async fn install(&self, request: InstallRequest) -> Result<(), ScaffoldError> {
        if request.skip_install {
            info!(
                "Skipping `{} install`; run it in {} when ready",
                self.program,
                request.project_dir.display()
            );
            return Ok(());
        }

        info!(program = %self.program, dir = %request.project_dir.display(), "Installing dependencies");
        let status = tokio::process::Command::new(&self.program)
            .arg("install")
            .current_dir(&request.project_dir)
            .status()
            .await
            .map_err(|e| {
                ScaffoldError::Install(format!("failed to run `{} install`: {}", self.program, e))
            })?;

        if !status.success() {
            warn!(program = %self.program, %status, "Dependency installation failed");
            return Err(ScaffoldError::Install(format!(
                "`{} install` exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// Installer that never starts a process and records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    requests: Mutex<Vec<InstallRequest>>,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<InstallRequest> {
        self.requests.lock().clone()
    }

    /// Requests that would have started the package manager
    pub fn installs(&self) -> usize {
        self.requests.lock().iter().filter(|r| !r.skip_install).count()
    }
}

#[async_trait]
impl DependencyInstaller for RecordingInstaller {
    async fn install(&self, request: InstallRequest) -> Result<(), ScaffoldError> {
        self.requests.lock().push(request);
        Ok(())
    }
}
