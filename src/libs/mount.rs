//! Scoped disk-image mounts.
//!
//! A mounted image must be detached on every exit path. [`MountedImage`]
//! detaches in `Drop` unless [`MountedImage::detach`] already ran, and
//! [`with_mounted_image`] runs a closure against the mount point and always
//! detaches before returning the closure's result.

use crate::libs::error::{LbiError, Result};
use crate::libs::process::{CommandRunner, ProcessSpec};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

static MOUNT_POINT_RE: OnceLock<Regex> = OnceLock::new();

fn mount_point_re() -> &'static Regex {
    MOUNT_POINT_RE.get_or_init(|| Regex::new(r"/Volumes/dmg\.\w+").expect("valid mount point regex"))
}

/// Mount point printed by `hdiutil attach -mountrandom /Volumes`.
pub fn parse_mount_point(output: &str) -> Option<PathBuf> {
    mount_point_re().find(output).map(|m| PathBuf::from(m.as_str()))
}

pub fn attach_command(image: &Path) -> ProcessSpec {
    ProcessSpec::new("hdiutil")
        .args(["attach", "-mountrandom", "/Volumes", "-nobrowse"])
        .arg(image)
}

pub fn detach_command(mount_point: &Path) -> ProcessSpec {
    ProcessSpec::new("hdiutil").args(["detach", "-force"]).arg(mount_point)
}

pub struct MountedImage<'a> {
    runner: &'a dyn CommandRunner,
    mount_point: PathBuf,
    detached: bool,
}

impl<'a> MountedImage<'a> {
    pub fn attach(runner: &'a dyn CommandRunner, image: &Path) -> Result<Self> {
        let output = runner.run(&attach_command(image)).map_err(|e| LbiError::MountFailed {
            path: image.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!("{}", output.trim());

        let mount_point = parse_mount_point(&output).ok_or_else(|| LbiError::MountFailed {
            path: image.to_path_buf(),
            reason: format!("could not parse mount point\n\nCommand: {}\n\nOutput:\n\n{}", attach_command(image), output),
        })?;

        Ok(Self {
            runner,
            mount_point,
            detached: false,
        })
    }

    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    pub fn detach(mut self) -> Result<()> {
        self.detached = true;
        self.runner.run(&detach_command(&self.mount_point)).map(|_| ())
    }
}

impl Drop for MountedImage<'_> {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Err(e) = self.runner.run(&detach_command(&self.mount_point)) {
            warn!("Failed to detach {}: {}", self.mount_point.display(), e);
        }
    }
}

/// Mounts `image`, hands the mount point to `f`, and detaches whatever `f` returned.
///
/// An error from `f` takes precedence over a detach error.
pub fn with_mounted_image<T, F>(runner: &dyn CommandRunner, image: &Path, f: F) -> Result<T>
where
    F: FnOnce(&Path) -> Result<T>,
{
    let mount = MountedImage::attach(runner, image)?;
    let result = f(mount.mount_point());
    let detached = mount.detach();

    let value = result?;
    detached?;
    Ok(value)
}
