use crate::libs::error::{LbiError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static BUILD_ID_RE: OnceLock<Regex> = OnceLock::new();

fn build_id_re() -> &'static Regex {
    BUILD_ID_RE.get_or_init(|| Regex::new(r"^build-(\d+)$").expect("valid build id regex"))
}

/// A `build-NNN` identifier within a release.
///
/// Ordering follows the numeric suffix only, so `build-100` sorts after
/// `build-099` regardless of how the catalog lists them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildId {
    raw: String,
    number: u32,
}

impl BuildId {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let number = build_id_re()
            .captures(value)
            .and_then(|captures| captures[1].parse::<u32>().ok())
            .ok_or_else(|| LbiError::InvalidFormat {
                kind: "build id",
                value: value.to_string(),
                expected: "build-NNN",
            })?;

        Ok(Self {
            raw: value.to_string(),
            number,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The form written to an installation's `version.txt`: `build-003` becomes `Build 3`.
    pub fn display_name(&self) -> String {
        format!("Build {}", self.number)
    }
}

impl Ord for BuildId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number).then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for BuildId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for BuildId {
    type Err = LbiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
