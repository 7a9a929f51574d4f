//! Running the vendor installer against an extracted bundle.
//!
//! Every run starts from an empty `install_tmpdir` inside the target
//! directory, extracts the bundle there and invokes the installer
//! non-interactively. The temp directory is removed only on success so a
//! failed run can be inspected.

use crate::libs::bundle::Platform;
use crate::libs::error::Result;
use crate::libs::extract::extract_bundle;
use crate::libs::process::{CommandRunner, ProcessSpec};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use tracing::info;

pub const INSTALL_TMPDIR: &str = "install_tmpdir";

/// Lets the installer proceed on OS versions it was not certified for.
pub const UNSUPPORTED_PLATFORMS_ENV: &str = "SCHRODINGER_INSTALL_UNSUPPORTED_PLATFORMS";

/// Removes `dir` if it exists and creates it again, empty.
pub fn create_clean_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        info!("Removing previous {}", dir.display());
        fs::remove_dir_all(dir)?;
    }
    info!("Creating {}", dir.display());
    fs::create_dir_all(dir)
}

pub fn windows_install_command(installer_dir: &Path, target_dir: &Path) -> ProcessSpec {
    ProcessSpec::new(installer_dir.join("setup-silent.exe"))
        .args(["/interactive_mode:off", "/install"])
        .arg(format!("/installdir:'{}'", target_dir.display()))
        .arg("/force")
        .current_dir(installer_dir)
        .env(UNSUPPORTED_PLATFORMS_ENV, "1")
}

/// `INSTALL` script invocation; every `*.tar.gz` product archive in the directory is installed.
pub fn linux_install_command(installer_dir: &Path, target_dir: &Path) -> Result<ProcessSpec> {
    let mut products: Vec<String> = fs::read_dir(installer_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tar.gz"))
        .collect();
    products.sort();

    Ok(ProcessSpec::new(installer_dir.join("INSTALL"))
        .arg("-b")
        .arg("-d")
        .arg(installer_dir)
        .arg("-t")
        .arg(target_dir.join("thirdparty"))
        .arg("-s")
        .arg(target_dir)
        .args(["-k", "/scr", "--allow_deprecated"])
        .args(products)
        .current_dir(installer_dir)
        .env(UNSUPPORTED_PLATFORMS_ENV, "1"))
}

pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    platform: Platform,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, platform: Platform) -> Self {
        Self { runner, platform }
    }

    /// Extracts `bundle` and installs it into `install_dir`.
    ///
    /// # Errors
    ///
    /// Returns `InstallFailed` with the installer's output when it exits
    /// non-zero. Nothing is rolled back.
    pub fn install(&self, bundle: &Path, install_dir: &Path) -> Result<()> {
        let tmpdir = install_dir.join(INSTALL_TMPDIR);
        create_clean_dir(&tmpdir)?;
        extract_bundle(bundle, &tmpdir, self.platform, self.runner)?;

        match self.platform {
            Platform::Windows => self.run(&windows_install_command(&tmpdir, install_dir))?,
            Platform::Linux => self.run(&linux_install_command(&tmpdir, install_dir)?)?,
            Platform::MacOSX => self.darwin_install(&tmpdir, install_dir)?,
        }

        fs::remove_dir_all(&tmpdir)?;
        Ok(())
    }

    /// Unpacks the `Payload` of every `.pkg` in `installer_dir` into `target_dir`.
    fn darwin_install(&self, installer_dir: &Path, target_dir: &Path) -> Result<()> {
        let mut packages: Vec<_> = fs::read_dir(installer_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "pkg"))
            .collect();
        packages.sort();

        fs::create_dir_all(target_dir)?;
        for package in packages {
            let payload = package.join("Payload");
            let archive = package.with_extension("cpio");
            info!("Extracting payload from {}", payload.display());

            decompress_payload(&payload, &archive)?;
            self.run(&cpio_command(&archive, target_dir))?;
        }
        Ok(())
    }

    fn run(&self, spec: &ProcessSpec) -> Result<()> {
        info!("Running {}", spec);
        let output = self.runner.run(spec)?;
        if !output.trim().is_empty() {
            info!("{}", output.trim());
        }
        Ok(())
    }
}

/// `cpio -i` in the installation directory, reading a decompressed payload from stdin.
pub fn cpio_command(archive: &Path, target_dir: &Path) -> ProcessSpec {
    ProcessSpec::new("cpio").arg("-i").current_dir(target_dir).stdin_file(archive)
}

/// Gunzips a package `Payload` into `archive`.
pub fn decompress_payload(payload: &Path, archive: &Path) -> Result<u64> {
    let mut decoder = GzDecoder::new(BufReader::new(File::open(payload)?));
    let mut out = File::create(archive)?;
    Ok(io::copy(&mut decoder, &mut out)?)
}
