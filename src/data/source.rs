//! Where feature documents come from.
//!
//! A [`DataSource`] only produces the raw document text. Parsing and
//! rendering happen in the caller so that a failed fetch never reaches the
//! renderer.

use crate::{data::geojson::FeatureCollection, MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;

/// Shared HTTP client with a descriptive User-Agent. Building the client once
/// avoids TLS and connection pool setup for every request.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("poimap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
});

/// Anything that can produce a GeoJSON document asynchronously
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the raw document text
    async fn fetch(&self) -> Result<String>;

    /// Human-readable origin, used in log messages
    fn describe(&self) -> String;

    /// Fetch and parse in one step
    async fn load(&self) -> Result<FeatureCollection> {
        let body = self.fetch().await?;
        FeatureCollection::from_str(&body)
    }
}

/// Document served over HTTP(S)
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        log::debug!("fetching {}", self.url);
        let response = HTTP_CLIENT.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MapError::HttpStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Document on the local filesystem
#[cfg(feature = "tokio-runtime")]
pub struct FileSource {
    path: std::path::PathBuf,
}

#[cfg(feature = "tokio-runtime")]
impl FileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(feature = "tokio-runtime")]
#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        log::debug!("reading {}", self.path.display());
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Document already held in memory
pub struct InlineSource {
    label: String,
    body: String,
}

impl InlineSource {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl DataSource for InlineSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise
#[cfg(feature = "tokio-runtime")]
pub fn source_for(location: &str) -> Box<dyn DataSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inline_source_loads_collection() {
        let source = InlineSource::new(
            "inline",
            r#"{"type": "FeatureCollection", "features": []}"#,
        );
        let collection = source.load().await.unwrap();
        assert!(collection.is_empty());
        assert_eq!(source.describe(), "inline");
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileSource::new("does/not/exist.geojson");
        assert!(matches!(source.fetch().await, Err(MapError::Io(_))));
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_bundled_shop_data_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/clothshops.geojson");
        let collection = FileSource::new(path).load().await.unwrap();
        assert_eq!(collection.len(), 3);
    }

    #[cfg(feature = "tokio-runtime")]
    #[test]
    fn test_source_for_picks_by_scheme() {
        assert_eq!(
            source_for("https://example.org/shops.geojson").describe(),
            "https://example.org/shops.geojson"
        );
        assert_eq!(source_for("data/clothshops.geojson").describe(), "data/clothshops.geojson");
    }
}
