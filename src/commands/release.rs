use crate::{
    api::{CalendarOracle, ReleaseOracle},
    libs::{config::Config, messages::Message},
    msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReleaseArgs {
    /// Release calendar access token file
    #[arg(short, long, value_name = "PATH", default_value = "token.json")]
    pub token: PathBuf,
}

pub async fn cmd(args: ReleaseArgs) -> Result<()> {
    let calendar = Config::read()?.calendar();
    let release = CalendarOracle::new(&calendar.calendar_id, &args.token)
        .with_lookahead_weeks(calendar.lookahead_weeks)
        .current_release()
        .await?;

    msg_print!(Message::CurrentRelease(release.to_string()));
    Ok(())
}
