//! Domain error type for the build-discovery and install workflow.
//!
//! Commands work with `anyhow::Result`; everything below the command layer
//! returns [`LbiError`] so callers can tell a bad release string from a
//! failed transfer or a failed installer run.
//!
//! A build that lacks the requested bundle is not an error: the bundle
//! resolver returns `None` and the locator moves on to the next build.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LbiError>;

#[derive(Debug, Error)]
pub enum LbiError {
    /// A release or build identifier did not have the expected shape.
    #[error("Invalid {kind} '{value}', expected {expected}")]
    InvalidFormat {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Every build of the release was scanned without finding the bundle.
    #[error("No {bundle} installer for {platform} was found in any {release} build")]
    NotFound {
        release: String,
        bundle: String,
        platform: String,
    },

    /// Non-success HTTP status or a body shorter than advertised.
    #[error("Transfer from {url} failed: {reason}")]
    TransferError { url: String, reason: String },

    /// An external installer process exited unsuccessfully.
    ///
    /// `output` holds the combined stdout/stderr of the process, unmodified.
    #[error("Command `{command}` exited with {code}\n{output}")]
    InstallFailed {
        command: String,
        code: String,
        output: String,
    },

    #[error("Release calendar is unavailable: {reason}\n{remedy}")]
    OracleUnavailable { reason: String, remedy: String },

    #[error("No release target found in the next {weeks} weeks")]
    NoReleaseFound { weeks: i64 },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Could not mount disk image {path}: {reason}")]
    MountFailed { path: PathBuf, reason: String },

    #[error("Failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LbiError {
    pub fn transfer(url: impl Into<String>, reason: impl Into<String>) -> Self {
        LbiError::TransferError {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
