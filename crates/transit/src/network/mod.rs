//! Network and IO abstractions.

pub mod traits;

pub use traits::{fetch_route, fetch_stops, DataFetcher};
