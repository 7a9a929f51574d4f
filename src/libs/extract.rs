//! Bundle extraction, one procedure per platform.
//!
//! | Platform | Bundle     | Procedure                                          |
//! |----------|------------|----------------------------------------------------|
//! | Windows  | `.zip`     | unzip, then flatten `{stem}/` into the destination |
//! | Linux    | `.tar[.gz]`| untar, then flatten `{stem}/` into the destination |
//! | macOS    | `.dmg`     | mount, `xar -xvf {stem}.pkg`, detach               |
//!
//! The procedure is picked from the running platform, not from the file name.

use crate::libs::bundle::Platform;
use crate::libs::error::{LbiError, Result};
use crate::libs::mount::with_mounted_image;
use crate::libs::process::{CommandRunner, ProcessSpec};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tar::Archive;
use tracing::{debug, info};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ARCHIVE_SUFFIXES: [&str; 5] = [".tar.gz", ".tgz", ".tar", ".zip", ".dmg"];

/// File name of the bundle without its archive suffix.
pub fn bundle_stem(bundle: &Path) -> String {
    let name = bundle.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    ARCHIVE_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .map(str::to_string)
        .unwrap_or(name)
}

pub fn extract_bundle(bundle: &Path, destination: &Path, platform: Platform, runner: &dyn CommandRunner) -> Result<()> {
    info!("Extracting {} to {}", bundle.display(), destination.display());

    match platform {
        Platform::Windows => {
            extract_zip(bundle, destination)?;
            flatten(destination, &bundle_stem(bundle))
        }
        Platform::Linux => {
            extract_tar(bundle, destination)?;
            flatten(destination, &bundle_stem(bundle))
        }
        Platform::MacOSX => extract_disk_image(bundle, destination, runner),
    }
}

pub fn extract_zip(bundle: &Path, destination: &Path) -> Result<()> {
    let archive_error = |source| LbiError::Archive {
        path: bundle.to_path_buf(),
        source,
    };
    let mut archive = zip::ZipArchive::new(File::open(bundle)?).map_err(archive_error)?;
    archive.extract(destination).map_err(archive_error)?;
    Ok(())
}

/// Unpacks a plain or gzip-compressed tar archive.
pub fn extract_tar(bundle: &Path, destination: &Path) -> Result<()> {
    let mut file = File::open(bundle)?;
    let mut magic = [0u8; 2];
    let is_gzip = file.read_exact(&mut magic).is_ok() && magic == GZIP_MAGIC;
    file.seek(SeekFrom::Start(0))?;

    let reader: Box<dyn Read> = if is_gzip {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Archive::new(reader).unpack(destination)?;
    Ok(())
}

/// Moves the contents of `destination/{stem}` up into `destination`.
pub fn flatten(destination: &Path, stem: &str) -> Result<()> {
    let nested = destination.join(stem);
    if !nested.is_dir() {
        debug!("{} has no {} directory, nothing to flatten", destination.display(), stem);
        return Ok(());
    }

    let moved = fs::read_dir(&nested).and_then(|entries| {
        for entry in entries {
            let entry = entry?;
            let target = destination.join(entry.file_name());
            info!("Moving {} to {}", entry.path().display(), destination.display());
            fs::rename(entry.path(), target)?;
        }
        Ok(())
    });
    let removed = fs::remove_dir_all(&nested);

    moved?;
    removed?;
    Ok(())
}

pub fn xar_command(pkg: &Path, destination: &Path) -> ProcessSpec {
    ProcessSpec::new("xar").arg("-C").arg(destination).arg("-xvf").arg(pkg)
}

/// Mounts the image and expands the package inside it; the image is detached even on failure.
pub fn extract_disk_image(bundle: &Path, destination: &Path, runner: &dyn CommandRunner) -> Result<()> {
    let pkg_name = format!("{}.pkg", bundle_stem(bundle));
    with_mounted_image(runner, bundle, |mount_point| {
        runner.run(&xar_command(&mount_point.join(&pkg_name), destination))?;
        Ok(())
    })
}
