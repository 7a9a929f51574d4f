//! The end-to-end update workflow.
//!
//! ```text
//! locate build ──none──▶ NotFound
//!      │
//!      ▼
//! inspect install dir ──UpToDate──▶ done
//!      │ Stale: uninstall
//!      ▼
//! download ──download_only──▶ done
//!      │
//!      ▼
//! install ─▶ hosts file ─▶ license stub
//! ```
//!
//! Every stage runs to completion before the next starts. Any error aborts
//! the run; nothing is retried or rolled back.

use crate::api::HttpCatalog;
use crate::libs::build_id::BuildId;
use crate::libs::bundle::{BundleSpec, Platform};
use crate::libs::download::Downloader;
use crate::libs::error::Result;
use crate::libs::hosts::install_hosts_file;
use crate::libs::installation::{InstallState, LocalInstallation};
use crate::libs::installer::Installer;
use crate::libs::license::LicenseStub;
use crate::libs::locator::Locator;
use crate::libs::process::CommandRunner;
use crate::libs::release::Release;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub release: Release,
    pub spec: BundleSpec,
    pub download_dir: PathBuf,
    pub install_dir: PathBuf,
    pub download_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The installation already carries the newest build; nothing was touched.
    UpToDate { build: BuildId },
    /// Download-only run; the bundle is on disk and nothing was installed.
    Downloaded { build: BuildId, bundle: PathBuf },
    Installed { build: BuildId, install_dir: PathBuf },
}

pub struct Updater<'a> {
    catalog: &'a HttpCatalog,
    runner: &'a dyn CommandRunner,
    downloader: Downloader,
    platform: Platform,
    license: LicenseStub,
}

impl<'a> Updater<'a> {
    pub fn new(catalog: &'a HttpCatalog, runner: &'a dyn CommandRunner, platform: Platform) -> Self {
        Self {
            catalog,
            runner,
            downloader: Downloader::new(catalog.client().clone()),
            platform,
            license: LicenseStub::default(),
        }
    }

    pub fn with_license(mut self, license: LicenseStub) -> Self {
        self.license = license;
        self
    }

    pub fn with_downloader(mut self, downloader: Downloader) -> Self {
        self.downloader = downloader;
        self
    }

    pub async fn run(&self, request: &UpdateRequest) -> Result<UpdateOutcome> {
        let artifact = Locator::new(self.catalog).require(&request.release, &request.spec).await?;
        let build = artifact.build.clone();
        let bundle = request.download_dir.join(&artifact.file_name);

        info!(
            "Download directory used: {}\nInstallation directory used: {}",
            request.download_dir.display(),
            request.install_dir.display()
        );

        if !request.download_only {
            let installation = LocalInstallation::new(&request.install_dir);
            info!("Checking for a local {} installation", request.release);
            match installation.inspect(&build)? {
                InstallState::UpToDate => {
                    info!("You currently have the latest build, no update necessary");
                    return Ok(UpdateOutcome::UpToDate { build });
                }
                InstallState::Stale => {
                    info!("Local installation is out of date");
                    installation.uninstall(self.runner, self.platform)?;
                }
                InstallState::Absent => {}
            }
        }

        let url = self
            .catalog
            .artifact_url(&request.release, &build, &artifact.file_name);
        self.downloader.download(&url, &bundle).await?;

        if request.download_only {
            info!("Download-only enabled, stopping execution");
            return Ok(UpdateOutcome::Downloaded { build, bundle });
        }

        Installer::new(self.runner, self.platform).install(&bundle, &request.install_dir)?;

        let hosts = self.catalog.hosts_file(&request.release, &build).await?;
        install_hosts_file(&hosts, &request.install_dir)?;
        self.license.install(&request.install_dir)?;

        Ok(UpdateOutcome::Installed {
            build,
            install_dir: request.install_dir.clone(),
        })
    }
}
