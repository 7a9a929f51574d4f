//! Clients for the remote services lbi talks to.
//!
//! - **Catalog**: the build-download server that lists builds per release,
//!   publishes installer bundles and generates hosts files.
//! - **Calendar**: the builds & releases calendar used to find the release
//!   currently being worked on.
//!
//! Both sit behind a trait so the discovery logic can be exercised against
//! in-memory fakes as well as against the real HTTP implementations.

use crate::libs::build_id::BuildId;
use crate::libs::error::Result;
use crate::libs::release::Release;

pub mod calendar;
pub mod catalog;

pub use calendar::CalendarOracle;
pub use catalog::{BuildType, HttpCatalog};

/// Source of the "current release" when the user does not name one.
#[allow(async_fn_in_trait)]
pub trait ReleaseOracle {
    /// Returns the nearest upcoming release target.
    ///
    /// # Errors
    ///
    /// - `OracleUnavailable` when credentials are missing or rejected
    /// - `NoReleaseFound` when the lookahead window has no release target
    async fn current_release(&self) -> Result<Release>;
}

/// Read access to the HTML catalog of builds.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// HTML listing of all builds published for a release.
    async fn build_listing(&self, release: &Release) -> Result<String>;

    /// HTML page of a single build, with installer sections per bundle type.
    async fn build_page(&self, release: &Release, build: &BuildId) -> Result<String>;
}
