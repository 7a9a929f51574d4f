use crate::libs::error::Result;
use crate::libs::installer::create_clean_dir;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const LICENSE_DIR: &str = "licenses";
pub const DEFAULT_LICENSE_SERVER: &str = "pdx-lic-lv01";
pub const DEFAULT_LICENSE_PORT: u16 = 27008;

/// Client license file that points an installation at a license server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseStub {
    server: String,
    port: u16,
}

impl LicenseStub {
    pub fn new(server: &str, port: u16) -> Self {
        Self {
            server: server.to_string(),
            port,
        }
    }

    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("80_client_{}_{}.lic", date.format("%Y-%m-%d"), self.server)
    }

    pub fn contents(&self) -> String {
        format!("SERVER {} ANY {}\nUSE_SERVER", self.server, self.port)
    }

    /// Recreates `{installation}/licenses` and writes today's stub into it.
    pub fn install(&self, installation_dir: &Path) -> Result<PathBuf> {
        self.install_dated(installation_dir, Local::now().date_naive())
    }

    pub fn install_dated(&self, installation_dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        let license_dir = installation_dir.join(LICENSE_DIR);
        info!("Installing license to {}", license_dir.display());
        create_clean_dir(&license_dir)?;

        let path = license_dir.join(self.file_name(date));
        fs::write(&path, self.contents())?;
        info!("License successfully installed");
        Ok(path)
    }

    /// Directive lines of an installed stub.
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        Ok(fs::read_to_string(path)?.lines().map(str::to_string).collect())
    }
}

impl Default for LicenseStub {
    fn default() -> Self {
        Self::new(DEFAULT_LICENSE_SERVER, DEFAULT_LICENSE_PORT)
    }
}
