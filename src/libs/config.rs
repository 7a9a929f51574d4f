//! Configuration management.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). Every section is optional in the file; a missing section
//! falls back to its defaults, so a fresh machine works with no file at all.
//!
//! ```json
//! {
//!   "catalog": { "base_url": "http://build-download.schrodinger.com" },
//!   "calendar": { "calendar_id": "...", "lookahead_weeks": 15 },
//!   "license": { "server": "pdx-lic-lv01", "port": 27008 },
//!   "paths": { "download_dir": "/data/downloads", "install_root": null }
//! }
//! ```
//!
//! `lbi init` edits the file through an interactive wizard.

use super::data_storage::DataStorage;
use crate::api::calendar::DEFAULT_LOOKAHEAD_WEEKS;
use crate::libs::license::{DEFAULT_LICENSE_PORT, DEFAULT_LICENSE_SERVER, LicenseStub};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_CATALOG_URL: &str = "http://build-download.schrodinger.com";
pub const DEFAULT_CALENDAR_ID: &str = "schrodinger.com_cl2hf12t7dim7s894gda2l9pa0@group.calendar.google.com";

/// A configurable section as offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
        }
    }
}

/// Where the current release target is looked up when no release is given.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CalendarConfig {
    pub calendar_id: String,
    pub lookahead_weeks: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            lookahead_weeks: DEFAULT_LOOKAHEAD_WEEKS,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LicenseConfig {
    pub server: String,
    pub port: u16,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_LICENSE_SERVER.to_string(),
            port: DEFAULT_LICENSE_PORT,
        }
    }
}

impl LicenseConfig {
    pub fn stub(&self) -> LicenseStub {
        LicenseStub::new(&self.server, self.port)
    }
}

/// Overrides for the per-platform default directories.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PathsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_root: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathsConfig>,
}

impl Config {
    /// Loads `config.json`, or the defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = Self::path()?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file = File::create(Self::path()?)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = Self::path()?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    pub fn path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn catalog(&self) -> CatalogConfig {
        self.catalog.clone().unwrap_or_default()
    }

    pub fn calendar(&self) -> CalendarConfig {
        self.calendar.clone().unwrap_or_default()
    }

    pub fn license(&self) -> LicenseConfig {
        self.license.clone().unwrap_or_default()
    }

    pub fn paths(&self) -> PathsConfig {
        self.paths.clone().unwrap_or_default()
    }

    pub fn modules() -> Vec<ConfigModule> {
        [
            ("catalog", Message::ConfigModuleCatalog),
            ("calendar", Message::ConfigModuleCalendar),
            ("license", Message::ConfigModuleLicense),
            ("paths", Message::ConfigModulePaths),
        ]
        .into_iter()
        .map(|(key, name)| ConfigModule {
            key: key.to_string(),
            name: name.to_string(),
        })
        .collect()
    }

    /// Runs the interactive setup wizard, starting from the current settings.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let modules = Self::modules();

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "catalog" => {
                    let default = config.catalog();
                    msg_print!(Message::ConfigModuleCatalog);
                    config.catalog = Some(CatalogConfig {
                        base_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptCatalogUrl.to_string())
                            .default(default.base_url)
                            .interact_text()?,
                    });
                }
                "calendar" => {
                    let default = config.calendar();
                    msg_print!(Message::ConfigModuleCalendar);
                    config.calendar = Some(CalendarConfig {
                        calendar_id: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptCalendarId.to_string())
                            .default(default.calendar_id)
                            .interact_text()?,
                        lookahead_weeks: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptLookaheadWeeks.to_string())
                            .default(default.lookahead_weeks)
                            .interact_text()?,
                    });
                }
                "license" => {
                    let default = config.license();
                    msg_print!(Message::ConfigModuleLicense);
                    config.license = Some(LicenseConfig {
                        server: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptLicenseServer.to_string())
                            .default(default.server)
                            .interact_text()?,
                        port: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptLicensePort.to_string())
                            .default(default.port)
                            .interact_text()?,
                    });
                }
                "paths" => {
                    let default = config.paths();
                    msg_print!(Message::ConfigModulePaths);
                    config.paths = Some(PathsConfig {
                        download_dir: prompt_optional_path(Message::PromptDownloadDir, default.download_dir)?,
                        install_root: prompt_optional_path(Message::PromptInstallRoot, default.install_root)?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

fn prompt_optional_path(prompt: Message, default: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default.map(|path| path.display().to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let value = value.trim();
    Ok((!value.is_empty()).then(|| PathBuf::from(value)))
}
