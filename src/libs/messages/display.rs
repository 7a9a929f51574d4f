//! Display implementation for application messages.
//!
//! All user-facing text lives here so commands only pick a [`Message`]
//! variant and one of the `msg_*!` macros.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted(path) => format!("Configuration removed: {}", path),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::ConfigModuleCatalog => "Build catalog".to_string(),
            Message::ConfigModuleCalendar => "Release calendar".to_string(),
            Message::ConfigModuleLicense => "License server".to_string(),
            Message::ConfigModulePaths => "Local paths".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptCatalogUrl => "Catalog base URL".to_string(),
            Message::PromptCalendarId => "Release calendar id".to_string(),
            Message::PromptLookaheadWeeks => "Weeks to look ahead for a release target".to_string(),
            Message::PromptLicenseServer => "License server host".to_string(),
            Message::PromptLicensePort => "License server port".to_string(),
            Message::PromptDownloadDir => "Download directory (empty for default)".to_string(),
            Message::PromptInstallRoot => "Install root (empty for default)".to_string(),

            // === RELEASE MESSAGES ===
            Message::ReleaseExplicit(release) => format!("Using release {}", release),
            Message::ReleaseFromCalendar(release) => format!("Release calendar points to {}", release),
            Message::CurrentRelease(release) => release.to_string(),

            // === LOCATOR MESSAGES ===
            Message::SearchingBuilds { bundle, platform, release } => {
                format!("Searching {} builds for the latest {} {} installer", release, bundle, platform)
            }
            Message::BuildFound { build, file_name } => format!("{}: {}", build, file_name),

            // === INSTALL MESSAGES ===
            Message::InstallationUpToDate { path, build } => {
                format!("{} is already at {}, nothing to do", path, build)
            }
            Message::DownloadOnlyComplete(path) => format!("Installer downloaded to {}", path),
            Message::InstallCompleted { build, path } => format!("{} installed to {}", build, path),
            Message::ElapsedTime(elapsed) => format!("Elapsed time: {}", elapsed),

            // === UNINSTALL MESSAGES ===
            Message::UninstallCompleted(path) => format!("Removed {}", path),
            Message::NothingToUninstall(path) => format!("Nothing installed at {}", path),

            // === VALIDATION MESSAGES ===
            Message::DownloadDirNotFound(path) => format!("Download directory {} does not exist", path),
            Message::InstallRootWithDownloadOnly => "--install-dest cannot be combined with --download-only".to_string(),
            Message::InstallRootOnWindows => "--install-dest is not supported on Windows".to_string(),
            Message::OptionalComponentBundle(bundle) => {
                format!("KNIME is only bundled with general and advanced installers, not {}", bundle)
            }
            Message::OptionalComponentPlatform => "KNIME selection only applies to MacOSX installers".to_string(),
        };

        write!(f, "{}", text)
    }
}
