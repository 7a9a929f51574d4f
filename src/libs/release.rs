//! Quarterly release identifiers.
//!
//! Users type releases in the short `YY-Q` form (`24-2`); catalog URLs and
//! install directories use the long `YYYY-Q` form (`2024-2`). Only years
//! 2020–2029 and quarters 1–4 are valid.

use crate::api::ReleaseOracle;
use crate::libs::error::{LbiError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, info};

static RELEASE_RE: OnceLock<Regex> = OnceLock::new();
static EVENT_TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn release_re() -> &'static Regex {
    RELEASE_RE.get_or_init(|| Regex::new(r"^(?:20)?(2[0-9])-([1-4])$").expect("valid release regex"))
}

fn event_title_re() -> &'static Regex {
    EVENT_TITLE_RE.get_or_init(|| Regex::new(r"^\s*(2[0-9])-([1-4])\b").expect("valid event title regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Release {
    year: u16,
    quarter: u8,
}

impl Release {
    /// Parses `YY-Q` or `YYYY-Q` and normalizes to the four-digit year.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || LbiError::InvalidFormat {
            kind: "release",
            value: value.to_string(),
            expected: "YY-Q with a year between 20 and 29 and a quarter between 1 and 4 (e.g. 24-2)",
        };

        let captures = release_re().captures(value.trim()).ok_or_else(invalid)?;
        let year: u16 = captures[1].parse().map_err(|_| invalid())?;
        let quarter: u8 = captures[2].parse().map_err(|_| invalid())?;

        Ok(Self { year: 2000 + year, quarter })
    }

    /// Extracts a release from a calendar event title such as `24-3 Release Target`.
    pub fn from_event_title(title: &str) -> Option<Self> {
        let captures = event_title_re().captures(title)?;
        let year: u16 = captures[1].parse().ok()?;
        let quarter: u8 = captures[2].parse().ok()?;
        Some(Self { year: 2000 + year, quarter })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.quarter)
    }
}

impl FromStr for Release {
    type Err = LbiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Returns the explicit release when given, otherwise asks the oracle.
pub async fn resolve_release<O: ReleaseOracle>(explicit: Option<&str>, oracle: &O) -> Result<Release> {
    match explicit {
        Some(value) => {
            let release = Release::parse(value)?;
            debug!(%release, "Using release given on the command line");
            Ok(release)
        }
        None => {
            let release = oracle.current_release().await?;
            info!(%release, "Release resolved from the release calendar");
            Ok(release)
        }
    }
}
