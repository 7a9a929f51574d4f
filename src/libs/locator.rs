//! Finding the newest build that publishes a bundle.
//!
//! Builds of a release are published incrementally and bundle variants can
//! lag behind, so the newest build is not guaranteed to carry the wanted
//! installer. The locator walks builds from newest to oldest and stops at the
//! first one that does; build pages older than the hit are never requested.

use crate::api::Catalog;
use crate::libs::build_id::BuildId;
use crate::libs::bundle::{select_installer, BundleSpec};
use crate::libs::error::{LbiError, Result};
use crate::libs::release::Release;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::{debug, info};

static LISTING_RE: OnceLock<Regex> = OnceLock::new();

fn listing_re() -> &'static Regex {
    LISTING_RE.get_or_init(|| Regex::new(r"\bbuild-\d+\b").expect("valid listing regex"))
}

/// Installer found for a bundle spec: the build that has it and its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub build: BuildId,
    pub file_name: String,
}

/// Extracts the build ids from a release listing, newest first.
///
/// The listing order is not trusted; ids are de-duplicated and sorted by number.
pub fn parse_build_listing(html: &str) -> Vec<BuildId> {
    let builds: BTreeSet<BuildId> = listing_re()
        .find_iter(html)
        .filter_map(|m| BuildId::parse(m.as_str()).ok())
        .collect();

    builds.into_iter().rev().collect()
}

pub struct Locator<'a, C: Catalog> {
    catalog: &'a C,
}

impl<'a, C: Catalog> Locator<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Installer file name for `spec` in one build, or `None` if that build lacks it.
    pub async fn resolve(&self, release: &Release, build: &BuildId, spec: &BundleSpec) -> Result<Option<String>> {
        let page = self.catalog.build_page(release, build).await?;
        let installer = select_installer(&page, spec);

        match &installer {
            Some(file_name) => debug!(%build, %file_name, "Installer found"),
            None => info!(
                "No {} {} installer found in {}, moving to the next build",
                spec.platform, spec.bundle_type, build
            ),
        }
        Ok(installer)
    }

    /// Scans the release's builds newest first and returns the first match.
    pub async fn locate(&self, release: &Release, spec: &BundleSpec) -> Result<Option<ResolvedArtifact>> {
        let listing = self.catalog.build_listing(release).await?;
        let candidates = parse_build_listing(&listing);
        info!(
            "Finding the latest available {} build for {} among {} builds of {}",
            spec.bundle_type,
            spec.platform,
            candidates.len(),
            release
        );

        for build in candidates {
            if let Some(file_name) = self.resolve(release, &build, spec).await? {
                info!("Latest {} build for {} is {}", spec.bundle_type, spec.platform, build);
                return Ok(Some(ResolvedArtifact { build, file_name }));
            }
        }

        Ok(None)
    }

    /// Like [`Locator::locate`], but a release without the bundle is an error.
    ///
    /// # Errors
    ///
    /// `NotFound` when no build of the release has it.
    pub async fn require(&self, release: &Release, spec: &BundleSpec) -> Result<ResolvedArtifact> {
        self.locate(release, spec).await?.ok_or_else(|| LbiError::NotFound {
            release: release.to_string(),
            bundle: spec.bundle_type.to_string(),
            platform: spec.platform.to_string(),
        })
    }
}
