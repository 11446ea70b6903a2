//! Map document and animation driver for the rail line demo.
//!
//! [`DemoSession::load`] fetches the stop and route data, resolves the
//! stretch of line between the configured stations and builds the map
//! style. [`DemoSession::play`] is the start trigger: every call clears the
//! previous run and animates a new batch of trains over the segment.

pub mod campaign;
pub mod config;
pub mod demo;
pub mod fetch;
pub mod paint;
pub mod source;
pub mod state;
pub mod style;

pub use campaign::{CampaignGate, CampaignVisibility, Element, VisibilitySink};
pub use config::{DemoConfig, GeometryKind};
pub use demo::{AnimationController, DemoError, DemoSession, PreparedRoute, prepare_route};
pub use fetch::{FileFetcher, HttpFetcher};
pub use paint::{ExtrusionPaint, PaintError};
pub use source::DataSources;
pub use state::MapState;
pub use style::{CameraOptions, MapStyle};
