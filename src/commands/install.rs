//! Install or update to the newest build that publishes a bundle.
//!
//! Resolves the release, finds the build, and hands the rest to the
//! [`Updater`]. The run ends with the elapsed wall-clock time.

use super::locate::TargetArgs;
use crate::{
    api::HttpCatalog,
    libs::{
        bundle::Platform,
        config::Config,
        installation::{default_download_dir, default_install_dir},
        messages::Message,
        process::SystemRunner,
        update::{UpdateOutcome, UpdateRequest, Updater},
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use chrono::{Duration, Local};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InstallArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Download the bundle to this existing directory instead of the user's Downloads
    #[arg(short = 'c', long, value_name = "PATH")]
    pub download_dest: Option<PathBuf>,

    /// Install under this directory (Mac and Linux only)
    #[arg(short, long, value_name = "PATH")]
    pub install_dest: Option<PathBuf>,

    /// Download the bundle only; nothing is installed or configured
    #[arg(short, long)]
    pub download_only: bool,
}

impl InstallArgs {
    /// Rejects flag combinations before anything touches the network or disk.
    pub fn validate(&self, platform: Platform) -> Result<()> {
        if let Some(dir) = &self.download_dest {
            if !dir.is_dir() {
                msg_bail_anyhow!(Message::DownloadDirNotFound(dir.display().to_string()));
            }
        }
        if self.download_only && self.install_dest.is_some() {
            msg_bail_anyhow!(Message::InstallRootWithDownloadOnly);
        }
        if platform == Platform::Windows && self.install_dest.is_some() {
            msg_bail_anyhow!(Message::InstallRootOnWindows);
        }
        self.target.validate(platform)
    }
}

/// Formats like `0h12m5s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    format!("{}h{}m{}s", seconds / 3600, seconds / 60 % 60, seconds % 60)
}

pub async fn cmd(args: InstallArgs) -> Result<()> {
    let started = Local::now();
    let platform = Platform::current()?;
    args.validate(platform)?;

    let config = Config::read()?;
    let release = args.target.release(&config).await?;
    let spec = args.target.spec(platform);
    let catalog = HttpCatalog::new(&config.catalog().base_url, args.target.build_type)?;

    let paths = config.paths();
    let download_dir = args
        .download_dest
        .clone()
        .or(paths.download_dir)
        .unwrap_or_else(|| default_download_dir(platform));
    let install_root = match platform {
        Platform::Windows => None,
        _ => args.install_dest.clone().or(paths.install_root),
    };
    let install_dir = default_install_dir(platform, &release, install_root.as_deref());

    msg_info!(Message::SearchingBuilds {
        bundle: spec.bundle_type.to_string(),
        platform: spec.platform.to_string(),
        release: release.to_string(),
    });

    let runner = SystemRunner;
    let updater = Updater::new(&catalog, &runner, platform).with_license(config.license().stub());
    let request = UpdateRequest {
        release,
        spec,
        download_dir,
        install_dir,
        download_only: args.download_only,
    };

    match updater.run(&request).await? {
        UpdateOutcome::UpToDate { build } => msg_info!(Message::InstallationUpToDate {
            path: request.install_dir.display().to_string(),
            build: build.display_name(),
        }),
        UpdateOutcome::Downloaded { bundle, .. } => {
            msg_success!(Message::DownloadOnlyComplete(bundle.display().to_string()))
        }
        UpdateOutcome::Installed { build, install_dir } => msg_success!(Message::InstallCompleted {
            build: build.display_name(),
            path: install_dir.display().to_string(),
        }),
    }

    msg_info!(Message::ElapsedTime(format_elapsed(Local::now() - started)));
    Ok(())
}
