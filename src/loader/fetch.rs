//! Location → bytes

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::document::{DocumentError, DocumentResult};

/// URL prefix under which sample files are served
pub const DOCS_PREFIX: &str = "/docs/";

/// Fetches the raw bytes behind a location
#[async_trait]
pub trait ByteFetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> DocumentResult<Vec<u8>>;
}

/// Plain file name of a sample, rejecting anything that could escape the
/// docs directory
pub fn sample_file_name(name: &str) -> Option<&str> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    valid.then_some(name)
}

/// Serves `/docs/{file}` locations from a local directory
#[derive(Debug, Clone)]
pub struct DocsDirFetcher {
    root: PathBuf,
}

impl DocsDirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path of a `/docs/{file}` location (query and fragment ignored)
    pub fn resolve_path(&self, location: &str) -> DocumentResult<PathBuf> {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let encoded = path
            .strip_prefix(DOCS_PREFIX)
            .ok_or_else(|| DocumentError::Fetch(format!("Unsupported location: {}", location)))?;
        let decoded = urlencoding::decode(encoded)
            .map_err(|e| DocumentError::Fetch(format!("Invalid location {}: {}", location, e)))?;

        let file = sample_file_name(&decoded)
            .ok_or_else(|| DocumentError::Fetch(format!("Invalid document path: {}", location)))?;
        Ok(self.root.join(file))
    }
}

#[async_trait]
impl ByteFetcher for DocsDirFetcher {
    async fn fetch(&self, location: &str) -> DocumentResult<Vec<u8>> {
        let path = self.resolve_path(location)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| DocumentError::Fetch(format!("{}: {}", location, e)))
    }
}

/// Fetches locations over HTTP, relative locations resolved against a base URL
pub struct HttpFetcher {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self::with_client(reqwest::Client::new(), reqwest::Url::parse(base_url)?))
    }

    pub fn with_client(client: reqwest::Client, base: reqwest::Url) -> Self {
        Self { client, base }
    }

    pub fn url_for(&self, location: &str) -> DocumentResult<reqwest::Url> {
        self.base
            .join(location)
            .map_err(|e| DocumentError::Fetch(format!("Invalid location {}: {}", location, e)))
    }
}

#[async_trait]
impl ByteFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> DocumentResult<Vec<u8>> {
        let url = self.url_for(location)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DocumentError::Fetch(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DocumentError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
