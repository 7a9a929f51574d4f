use crate::{
    api::{BuildType, CalendarOracle, HttpCatalog},
    libs::{
        bundle::{BundleSpec, BundleType, Platform},
        config::Config,
        locator::Locator,
        messages::Message,
        release::{resolve_release, Release},
    },
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// What to look for: shared by `locate` and `install`.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Type of bundle
    #[arg(value_enum)]
    pub bundle_type: BundleType,

    /// Nightly (NB) or official (OB) build
    #[arg(value_enum)]
    pub build_type: BuildType,

    /// Release in YY-Q format (e.g. 24-2). Looked up in the release calendar when omitted
    #[arg(short, long, value_name = "YY-Q")]
    pub release: Option<String>,

    /// Include KNIME (general and advanced bundles on MacOSX only)
    #[arg(short, long)]
    pub knime: bool,

    /// Release calendar access token file
    #[arg(short, long, value_name = "PATH", default_value = "token.json")]
    pub token: PathBuf,
}

impl TargetArgs {
    pub fn validate(&self, platform: Platform) -> Result<()> {
        if self.knime && !self.bundle_type.supports_optional_component() {
            msg_bail_anyhow!(Message::OptionalComponentBundle(self.bundle_type.to_string()));
        }
        if self.knime && platform != Platform::MacOSX {
            msg_bail_anyhow!(Message::OptionalComponentPlatform);
        }
        Ok(())
    }

    pub fn spec(&self, platform: Platform) -> BundleSpec {
        BundleSpec::new(self.bundle_type, platform, self.knime)
    }

    /// The explicit `--release`, or the calendar's current release target.
    pub async fn release(&self, config: &Config) -> Result<Release> {
        let calendar = config.calendar();
        let oracle = CalendarOracle::new(&calendar.calendar_id, &self.token).with_lookahead_weeks(calendar.lookahead_weeks);
        let release = resolve_release(self.release.as_deref(), &oracle).await?;

        match self.release {
            Some(_) => msg_info!(Message::ReleaseExplicit(release.to_string())),
            None => msg_info!(Message::ReleaseFromCalendar(release.to_string())),
        }
        Ok(release)
    }
}

#[derive(Debug, Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn cmd(args: LocateArgs) -> Result<()> {
    let platform = Platform::current()?;
    args.target.validate(platform)?;

    let config = Config::read()?;
    let release = args.target.release(&config).await?;
    let spec = args.target.spec(platform);
    let catalog = HttpCatalog::new(&config.catalog().base_url, args.target.build_type)?;

    msg_info!(Message::SearchingBuilds {
        bundle: spec.bundle_type.to_string(),
        platform: spec.platform.to_string(),
        release: release.to_string(),
    });

    let artifact = Locator::new(&catalog).require(&release, &spec).await?;

    msg_print!(Message::BuildFound {
        build: artifact.build.to_string(),
        file_name: artifact.file_name,
    });
    Ok(())
}
