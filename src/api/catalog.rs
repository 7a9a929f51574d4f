use super::Catalog;
use crate::libs::build_id::BuildId;
use crate::libs::error::{LbiError, Result};
use crate::libs::release::Release;
use clap::ValueEnum;
use reqwest::{Client, Response};
use std::fmt;
use tracing::debug;

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

const HOSTS_URL: &str = "generatehosts/generate_hosts_file";

/// Nightly or official build stream; the first segment of every catalog path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BuildType {
    #[value(name = "NB")]
    Nightly,
    #[value(name = "OB")]
    Official,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Nightly => "NB",
            BuildType::Official => "OB",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    build_type: BuildType,
}

impl HttpCatalog {
    pub fn new(base_url: &str, build_type: BuildType) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", APP_METADATA_NAME, APP_METADATA_VERSION))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            build_type,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn release_url(&self, release: &Release) -> String {
        format!("{}/{}/{}", self.base_url, self.build_type, release)
    }

    pub fn build_url(&self, release: &Release, build: &BuildId) -> String {
        format!("{}/{}", self.release_url(release), build)
    }

    pub fn artifact_url(&self, release: &Release, build: &BuildId, file_name: &str) -> String {
        format!("{}/{}", self.build_url(release, build), file_name)
    }

    /// Asks the catalog server to generate the hosts file for an installed build.
    pub async fn hosts_file(&self, release: &Release, build: &BuildId) -> Result<String> {
        let url = format!("{}/{}", self.base_url, HOSTS_URL);
        let release = release.to_string();
        let form = [
            ("build_type", self.build_type.as_str()),
            ("release", release.as_str()),
            ("build_id", build.as_str()),
        ];

        debug!(%url, "Requesting hosts file");
        let res = self.client.post(&url).form(&form).send().await?;
        Ok(Self::ensure_success(&url, res)?.text().await?)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!(%url, "Fetching catalog page");
        let res = self.client.get(url).send().await?;
        Ok(Self::ensure_success(url, res)?.text().await?)
    }

    fn ensure_success(url: &str, res: Response) -> Result<Response> {
        if res.status().is_success() {
            Ok(res)
        } else {
            Err(LbiError::transfer(url, format!("server responded with {}", res.status())))
        }
    }
}

impl Catalog for HttpCatalog {
    async fn build_listing(&self, release: &Release) -> Result<String> {
        self.get_text(&self.release_url(release)).await
    }

    async fn build_page(&self, release: &Release, build: &BuildId) -> Result<String> {
        self.get_text(&self.build_url(release, build)).await
    }
}
