//! Transit data providers.

pub mod parse;
pub mod static_provider;

pub use static_provider::{RouteImpl, StaticTransitProvider, StationImpl};
