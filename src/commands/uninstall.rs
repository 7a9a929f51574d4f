use crate::{
    libs::{
        bundle::Platform,
        config::Config,
        installation::{default_install_dir, LocalInstallation},
        messages::Message,
        process::SystemRunner,
        release::Release,
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct UninstallArgs {
    /// Release in YY-Q format (e.g. 24-2)
    #[arg(value_name = "YY-Q")]
    pub release: String,

    /// Directory the release was installed under (Mac and Linux only)
    #[arg(short, long, value_name = "PATH")]
    pub install_dest: Option<PathBuf>,
}

pub fn cmd(args: UninstallArgs) -> Result<()> {
    let platform = Platform::current()?;
    if platform == Platform::Windows && args.install_dest.is_some() {
        msg_bail_anyhow!(Message::InstallRootOnWindows);
    }

    let release = Release::parse(&args.release)?;
    let install_root = match platform {
        Platform::Windows => None,
        _ => args.install_dest.or(Config::read()?.paths().install_root),
    };
    let installation = LocalInstallation::new(default_install_dir(platform, &release, install_root.as_deref()));

    if !installation.exists() {
        msg_info!(Message::NothingToUninstall(installation.path().display().to_string()));
        return Ok(());
    }

    installation.uninstall(&SystemRunner, platform)?;
    msg_success!(Message::UninstallCompleted(installation.path().display().to_string()));
    Ok(())
}
