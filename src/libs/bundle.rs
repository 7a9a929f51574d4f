//! Bundle selection on a per-build catalog page.
//!
//! A build page groups installer links under `<h3>{Type} Installers</h3>`
//! headers, one list per bundle type. Picking an installer means finding the
//! right section, keeping the links for the wanted platform and, on macOS,
//! choosing between the variants with and without the optional component.
//!
//! ## Page shape
//!
//! ```text
//! <h3>General Installers</h3>
//! <ul>
//!   <li><a href="/OB/2024-2/build-049/Suite_2024-2_MacOSX_knime.dmg">MacOSX (with KNIME)</a></li>
//!   <li><a href="/OB/2024-2/build-049/Suite_2024-2_MacOSX.dmg">MacOSX</a></li>
//!   <li><a href="/OB/2024-2/build-049/Suite_2024-2_Linux-x86_64.tar">Linux</a></li>
//! </ul>
//! ```
//!
//! `desres` bundles have no section of their own: they are published under
//! the Academic header and told apart by a `DESRES` marker in the link text.

use crate::libs::error::{LbiError, Result};
use clap::ValueEnum;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static LINK_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static OPEN_TAG_RE: OnceLock<Regex> = OnceLock::new();

fn link_re() -> &'static Regex {
    LINK_RE.get_or_init(|| Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#).expect("valid link regex"))
}

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"(?s)<[^>]+>").expect("valid tag regex"))
}

fn open_tag_re() -> &'static Regex {
    OPEN_TAG_RE.get_or_init(|| Regex::new(r"<([A-Za-z][A-Za-z0-9]*)[\s>]").expect("valid open tag regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BundleType {
    Academic,
    General,
    Advanced,
    Desres,
}

impl BundleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleType::Academic => "academic",
            BundleType::General => "general",
            BundleType::Advanced => "advanced",
            BundleType::Desres => "desres",
        }
    }

    /// Text of the `<h3>` that precedes this bundle's installer list.
    pub fn section_header(&self) -> String {
        let name = match self {
            BundleType::Academic | BundleType::Desres => "Academic",
            BundleType::General => "General",
            BundleType::Advanced => "Advanced",
        };
        format!("{} Installers", name)
    }

    /// Whether an optional component variant can be requested for this bundle type.
    pub fn supports_optional_component(&self) -> bool {
        matches!(self, BundleType::General | BundleType::Advanced)
    }
}

impl fmt::Display for BundleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating platform as named in catalog link texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOSX,
    Linux,
}

impl Platform {
    /// The platform this binary is running on.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "windows" => Ok(Platform::Windows),
            "macos" => Ok(Platform::MacOSX),
            "linux" => Ok(Platform::Linux),
            other => Err(LbiError::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOSX => "MacOSX",
            Platform::Linux => "Linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Which installer artifact the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleSpec {
    pub bundle_type: BundleType,
    pub platform: Platform,
    pub include_optional_component: bool,
}

impl BundleSpec {
    pub fn new(bundle_type: BundleType, platform: Platform, include_optional_component: bool) -> Self {
        Self {
            bundle_type,
            platform,
            include_optional_component,
        }
    }

    /// Substring a link text must contain to be considered.
    pub fn link_marker(&self) -> &'static str {
        match self.bundle_type {
            BundleType::Desres => "DESRES",
            _ => self.platform.marker(),
        }
    }

    /// macOS lists the optional-component variant first; without it the second link is wanted.
    fn prefers_second_link(&self) -> bool {
        self.platform == Platform::MacOSX && !self.include_optional_component && self.bundle_type != BundleType::Academic
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerLink {
    pub href: String,
    pub text: String,
}

impl InstallerLink {
    /// Last path segment of the link target.
    pub fn file_name(&self) -> String {
        self.href.rsplit('/').next().unwrap_or(&self.href).to_string()
    }
}

/// Returns the block that follows the bundle's section header, if the header exists.
fn section_after_header<'a>(page: &'a str, header: &str) -> Option<&'a str> {
    let header_re = Regex::new(&format!(r"(?is)<h3[^>]*>\s*{}\s*</h3\s*>", regex::escape(header))).ok()?;
    let rest = &page[header_re.find(page)?.end()..];

    // First element after the header, up to its closing tag.
    let Some(open) = open_tag_re().captures(rest) else {
        return Some(rest);
    };
    let tag = open[1].to_ascii_lowercase();
    let start = open.get(0).map(|m| m.start()).unwrap_or(0);
    if tag == "h3" {
        return Some("");
    }

    let close = format!("</{}", tag);
    let lower = rest.to_ascii_lowercase();
    let end = lower[start..]
        .find(&close)
        .map(|offset| start + offset)
        .or_else(|| lower[start..].find("<h3").map(|offset| start + offset))
        .unwrap_or(rest.len());

    Some(&rest[start..end])
}

/// All links in the bundle's section whose text carries the spec's marker, in page order.
pub fn matching_links(page: &str, spec: &BundleSpec) -> Vec<InstallerLink> {
    let Some(section) = section_after_header(page, &spec.bundle_type.section_header()) else {
        return Vec::new();
    };

    let marker = spec.link_marker();
    link_re()
        .captures_iter(section)
        .map(|captures| InstallerLink {
            href: captures[1].trim().to_string(),
            text: tag_re().replace_all(&captures[2], "").trim().to_string(),
        })
        .filter(|link| link.text.contains(marker))
        .collect()
}

/// Picks the installer file name for `spec` from a build page, or `None` when the
/// build does not publish it.
pub fn select_installer(page: &str, spec: &BundleSpec) -> Option<String> {
    let links = matching_links(page, spec);
    let link = if spec.prefers_second_link() {
        links.get(1).or_else(|| links.first())
    } else {
        links.first()
    }?;

    Some(link.file_name())
}
