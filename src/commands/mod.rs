pub mod init;
pub mod install;
pub mod locate;
pub mod release;
pub mod uninstall;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Install or update to the latest build that publishes a bundle")]
    Install(install::InstallArgs),
    #[command(about = "Print the latest build that publishes a bundle and its installer name")]
    Locate(locate::LocateArgs),
    #[command(about = "Print the current release from the release calendar")]
    Release(release::ReleaseArgs),
    #[command(about = "Remove a local installation")]
    Uninstall(uninstall::UninstallArgs),
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Install(args) => install::cmd(args).await,
            Commands::Locate(args) => locate::cmd(args).await,
            Commands::Release(args) => release::cmd(args).await,
            Commands::Uninstall(args) => uninstall::cmd(args),
            Commands::Init(args) => init::cmd(args),
        }
    }
}
