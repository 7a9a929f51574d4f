use crate::libs::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const HOSTS_FILE: &str = "schrodinger.hosts";

/// Writes a generated hosts file into the installation, replacing the stock one.
pub fn install_hosts_file(contents: &str, installation_dir: &Path) -> Result<PathBuf> {
    let hosts_path = installation_dir.join(HOSTS_FILE);
    if hosts_path.is_file() {
        fs::remove_file(&hosts_path)?;
    }

    info!("Installing {}", HOSTS_FILE);
    fs::write(&hosts_path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        info!("Setting permissions for {}", HOSTS_FILE);
        fs::set_permissions(&hosts_path, fs::Permissions::from_mode(0o776))?;
    }

    info!("{} successfully installed", HOSTS_FILE);
    Ok(hosts_path)
}
