//! [`DataFetcher`] implementations for HTTP and the local filesystem.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use liner_transit::network::DataFetcher;
use liner_transit::{Result, TransitError};

/// Fetches over HTTP(S). Relative urls are joined onto `base`.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Option<reqwest::Url>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base: None,
        }
    }

    pub fn with_base(base: reqwest::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: Some(base),
        }
    }

    fn resolve(&self, url: &str) -> Result<reqwest::Url> {
        let parsed = match &self.base {
            Some(base) => base.join(url),
            None => reqwest::Url::parse(url),
        };

        parsed.map_err(|e| TransitError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let fetch_error = |e: reqwest::Error| TransitError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };

        let target = self.resolve(url)?;
        tracing::debug!(%target, "fetching");

        let response = self
            .client
            .get(target)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fetch_error)?;

        let body = response.bytes().await.map_err(fetch_error)?;
        Ok(body.to_vec())
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(self.get(url))
    }
}

/// Reads paths relative to a root directory.
#[derive(Clone, Debug)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl DataFetcher for FileFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.root.join(url);
            tracing::debug!(path = %path.display(), "reading");

            tokio::fs::read(&path).await.map_err(|e| TransitError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_resolves_relative_urls() {
        let base = reqwest::Url::parse("https://example.com/app/").unwrap();
        let fetcher = HttpFetcher::with_base(base);

        let url = fetcher.resolve("./data/route.geojson").unwrap();
        assert_eq!(url.as_str(), "https://example.com/app/data/route.geojson");
    }

    #[test]
    fn test_http_without_base_needs_absolute_url() {
        let err = HttpFetcher::new().resolve("./data/route.geojson").unwrap_err();
        assert!(matches!(err, TransitError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_relative_paths() {
        let root = std::env::temp_dir().join(format!("liner-map-fetch-{}", std::process::id()));
        tokio::fs::create_dir_all(root.join("data")).await.unwrap();
        tokio::fs::write(root.join("data/stops.geojson"), b"{}").await.unwrap();

        let fetcher = FileFetcher::new(&root);
        assert_eq!(fetcher.fetch("./data/stops.geojson").await.unwrap(), b"{}");

        let err = fetcher.fetch("./data/missing.geojson").await.unwrap_err();
        assert!(matches!(err, TransitError::Fetch { ref url, .. } if url == "./data/missing.geojson"));

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
