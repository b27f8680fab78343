//! Read-only access to the category and location collections.
//!
//! The two endpoints are stateless and idempotent; any non-2xx answer is a
//! terminal error for the caller. A document-database backend would be one
//! more [`DataSource`] implementation.

use crate::core::config::DataSourceConfig;
use crate::data::category::Category;
use crate::data::geojson::LocationCollection;
use crate::{MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;

/// Shared async HTTP client for both collections
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("lohas/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            Client::new()
        })
});

/// The two collections a source serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Categories,
    Locations,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Categories => "categories",
            Resource::Locations => "locations",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Categories => "categories.json",
            Resource::Locations => "locations.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Full category tree, roots in display order
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Full location collection
    async fn locations(&self) -> Result<LocationCollection>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Builds the source named by the configuration
pub fn from_config(config: &DataSourceConfig) -> Box<dyn DataSource> {
    match config {
        DataSourceConfig::Http { base_url } => Box::new(HttpDataSource::new(base_url.clone())),
        #[cfg(feature = "tokio-runtime")]
        DataSourceConfig::Files { dir } => Box::new(FileDataSource::new(dir.clone())),
        #[cfg(not(feature = "tokio-runtime"))]
        DataSourceConfig::Files { dir } => Box::new(BlockingFileDataSource::new(dir.clone())),
    }
}

/// `GET {base_url}/categories` and `GET {base_url}/locations`
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn url(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    async fn get_text(&self, resource: Resource) -> Result<String> {
        let url = self.url(resource);
        log::debug!("GET {}", url);

        let response = HTTP_CLIENT.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered HTTP {}", url, status);
            return Err(MapError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: Resource) -> Result<T> {
        let body = self.get_text(resource).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.get_json(Resource::Categories).await
    }

    async fn locations(&self) -> Result<LocationCollection> {
        let body = self.get_text(Resource::Locations).await?;
        LocationCollection::from_json_str(&body)
    }

    fn describe(&self) -> String {
        format!("http {}", self.base_url)
    }
}

/// `categories.json` and `locations.json` in a directory, read on every call
#[cfg(feature = "tokio-runtime")]
#[derive(Debug, Clone)]
pub struct FileDataSource {
    dir: PathBuf,
}

#[cfg(feature = "tokio-runtime")]
impl FileDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, resource: Resource) -> PathBuf {
        self.dir.join(resource.file_name())
    }

    async fn read(&self, resource: Resource) -> Result<String> {
        let path = self.path(resource);
        log::debug!("reading {}", path.display());
        Ok(tokio::fs::read_to_string(&path).await?)
    }
}

#[cfg(feature = "tokio-runtime")]
#[async_trait]
impl DataSource for FileDataSource {
    async fn categories(&self) -> Result<Vec<Category>> {
        let raw = self.read(Resource::Categories).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn locations(&self) -> Result<LocationCollection> {
        let raw = self.read(Resource::Locations).await?;
        LocationCollection::from_json_str(&raw)
    }

    fn describe(&self) -> String {
        format!("files in {}", self.dir.display())
    }
}

/// File source for builds without an async runtime; reads block the caller
#[cfg(not(feature = "tokio-runtime"))]
#[derive(Debug, Clone)]
pub struct BlockingFileDataSource {
    dir: PathBuf,
}

#[cfg(not(feature = "tokio-runtime"))]
impl BlockingFileDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[cfg(not(feature = "tokio-runtime"))]
#[async_trait]
impl DataSource for BlockingFileDataSource {
    async fn categories(&self) -> Result<Vec<Category>> {
        let raw = std::fs::read_to_string(self.dir.join(Resource::Categories.file_name()))?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn locations(&self) -> Result<LocationCollection> {
        let raw = std::fs::read_to_string(self.dir.join(Resource::Locations.file_name()))?;
        LocationCollection::from_json_str(&raw)
    }

    fn describe(&self) -> String {
        format!("files in {}", self.dir.display())
    }
}

/// Fixed in-memory collections, optionally failing one resource
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
    categories: Vec<Category>,
    locations: LocationCollection,
    failure: Option<(Resource, u16)>,
}

impl MemoryDataSource {
    pub fn new(categories: Vec<Category>, locations: LocationCollection) -> Self {
        Self {
            categories,
            locations,
            failure: None,
        }
    }

    /// Makes `resource` answer as if the server returned `status`
    pub fn with_failure(mut self, resource: Resource, status: u16) -> Self {
        self.failure = Some((resource, status));
        self
    }

    fn check(&self, resource: Resource) -> Result<()> {
        match self.failure {
            Some((failing, status)) if failing == resource => Err(MapError::Status {
                resource: resource.to_string(),
                status,
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DataSource for MemoryDataSource {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.check(Resource::Categories)?;
        Ok(self.categories.clone())
    }

    async fn locations(&self) -> Result<LocationCollection> {
        self.check(Resource::Locations)?;
        Ok(self.locations.clone())
    }

    fn describe(&self) -> String {
        format!(
            "memory ({} categories, {} locations)",
            self.categories.len(),
            self.locations.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_urls() {
        let source = HttpDataSource::new("http://localhost:3000/api/");
        assert_eq!(
            source.url(Resource::Categories),
            "http://localhost:3000/api/categories"
        );
        assert_eq!(
            source.url(Resource::Locations),
            "http://localhost:3000/api/locations"
        );
    }

    #[tokio::test]
    async fn test_memory_source_failure() {
        let source = MemoryDataSource::default().with_failure(Resource::Locations, 503);
        assert!(source.categories().await.is_ok());
        match source.locations().await {
            Err(MapError::Status { resource, status }) => {
                assert_eq!(resource, "locations");
                assert_eq!(status, 503);
            }
            other => panic!("unexpected {:?}", other.map(|c| c.len())),
        }
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_file_source_missing_dir_is_io_error() {
        let source = FileDataSource::new("/definitely/not/here");
        assert!(matches!(source.categories().await, Err(MapError::Io(_))));
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_file_source_reads_bundled_data() {
        let source = FileDataSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let categories = source.categories().await.unwrap();
        let locations = source.locations().await.unwrap();
        assert!(!categories.is_empty());
        assert!(!locations.is_empty());
    }
}
