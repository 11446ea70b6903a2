//! Pluggable networking traits.
//!
//! External crates implement these to provide data fetching capabilities.

use std::future::Future;
use std::pin::Pin;

use crate::models::types::Result;
use crate::provider::{parse, RouteImpl, StationImpl};

/// Fetch raw bytes from a URL or path
pub trait DataFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}

/// Fetch and parse a stops feature collection
pub async fn fetch_stops(fetcher: &dyn DataFetcher, url: &str) -> Result<Vec<StationImpl>> {
    let bytes = fetcher.fetch(url).await?;
    parse::parse_stops(&bytes)
}

/// Fetch and parse a route feature collection
pub async fn fetch_route(fetcher: &dyn DataFetcher, url: &str) -> Result<RouteImpl> {
    let bytes = fetcher.fetch(url).await?;
    parse::parse_route(&bytes)
}
