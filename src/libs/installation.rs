//! Local installation state.
//!
//! An installation directory records the installed build in `version.txt`.
//! Comparing that file against the build the catalog offers decides whether
//! an update run does nothing, replaces the installation or installs fresh.
//!
//! ## States
//!
//! ```text
//! directory missing                         -> Absent   (download + install)
//! version.txt contains "Build N"            -> UpToDate (stop, no side effects)
//! anything else                             -> Stale    (uninstall, then as Absent)
//! ```
//!
//! The check is a substring match on the build's display form, so a manifest
//! mentioning `Build 142` also matches `Build 14`. That weakness is accepted.

use crate::libs::build_id::BuildId;
use crate::libs::bundle::Platform;
use crate::libs::error::Result;
use crate::libs::process::{CommandRunner, ProcessSpec};
use crate::libs::release::Release;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

pub const MANIFEST_FILE: &str = "version.txt";

/// Time the Windows uninstaller needs before its directory can be removed.
pub const WINDOWS_UNINSTALL_SETTLE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Absent,
    UpToDate,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInstallation {
    path: PathBuf,
    uninstall_settle: Duration,
}

impl LocalInstallation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            uninstall_settle: WINDOWS_UNINSTALL_SETTLE,
        }
    }

    /// Wait between the Windows uninstaller and removing what it left.
    pub fn uninstall_settle(mut self, settle: Duration) -> Self {
        self.uninstall_settle = settle;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE)
    }

    /// Full contents of `version.txt`.
    pub fn manifest(&self) -> Result<String> {
        Ok(fs::read_to_string(self.manifest_path())?)
    }

    pub fn inspect(&self, wanted: &BuildId) -> Result<InstallState> {
        if !self.exists() {
            info!("No local installation found at {}", self.path.display());
            return Ok(InstallState::Absent);
        }

        let manifest = match self.manifest() {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("Local installation has no readable {}: {}", MANIFEST_FILE, e);
                return Ok(InstallState::Stale);
            }
        };
        info!("Local installation found, {} shows:\n{}", MANIFEST_FILE, manifest.trim());

        if manifest.contains(&wanted.display_name()) {
            Ok(InstallState::UpToDate)
        } else {
            Ok(InstallState::Stale)
        }
    }

    /// Removes the installation entirely.
    ///
    /// On Windows the bundled silent uninstaller runs first; whatever it leaves
    /// behind is deleted afterwards.
    pub fn uninstall(&self, runner: &dyn CommandRunner, platform: Platform) -> Result<()> {
        if platform == Platform::Windows {
            let uninstaller = self.path.join("installer").join("uninstall-silent.exe");
            if uninstaller.exists() {
                let spec = ProcessSpec::new(&uninstaller).args(["/interactive_mode:off", "/cleanall"]);
                if let Err(e) = runner.run(&spec) {
                    warn!("Uninstaller reported a failure, removing files directly: {}", e);
                }
                thread::sleep(self.uninstall_settle);
            }
        }

        if self.path.exists() {
            info!("Removing {}", self.path.display());
            fs::remove_dir_all(&self.path)?;
        }
        Ok(())
    }
}

/// `~/Downloads`, or `%USERPROFILE%\Downloads` on Windows.
pub fn default_download_dir(platform: Platform) -> PathBuf {
    let home = match platform {
        Platform::Windows => var("USERPROFILE").unwrap_or_else(|_| ".".into()),
        _ => var("HOME").unwrap_or_else(|_| ".".into()),
    };
    Path::new(&home).join("Downloads")
}

/// Installation directory for `release`, under `root` when one is given.
pub fn default_install_dir(platform: Platform, release: &Release, root: Option<&Path>) -> PathBuf {
    let suites = format!("suites{}", release);
    if let Some(root) = root {
        return root.join(suites);
    }

    match platform {
        Platform::Windows => PathBuf::from(format!("C:\\Program Files\\Schrodinger{}", release)),
        Platform::MacOSX => Path::new("/opt/schrodinger/LBI").join(suites),
        Platform::Linux => Path::new("/scr/LBI").join(suites),
    }
}
