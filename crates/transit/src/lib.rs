//! # liner-transit
//!
//! Station and route data for the rail line animation.
//!
//! ## Features
//!
//! - **GeoJSON input**: stops and route geometry parsed from feature collections
//! - **Name lookup**: stations are resolved by their display name
//! - **Pluggable networking**: implement [`DataFetcher`] to load the raw files
//!
//! ## Example
//!
//! ```
//! use liner_transit::prelude::*;
//!
//! let stops = br#"{
//!     "type": "FeatureCollection",
//!     "features": [
//!         { "type": "Feature", "properties": { "stop_name": "A" },
//!           "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } },
//!         { "type": "Feature", "properties": { "stop_name": "B" },
//!           "geometry": { "type": "Point", "coordinates": [1.0, 0.0] } }
//!     ]
//! }"#;
//!
//! let provider = StaticTransitProvider::from_stations(parse_stops(stops).unwrap());
//! let b = provider.station_by_name("B").unwrap();
//! assert_eq!(b.location().x(), 1.0);
//! ```

pub mod identifiers;
pub mod models;
pub mod provider;
pub mod network;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{traits::*, types::*};
    pub use crate::provider::{
        parse::{parse_route, parse_stops},
        static_provider::StaticTransitProvider,
        RouteImpl, StationImpl,
    };
    pub use crate::network::traits::*;
}

pub use prelude::*;
