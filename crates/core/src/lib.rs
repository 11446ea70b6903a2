//! Route-segment animation engine.
//!
//! Resolves the stretch of a route between two stations, moves a batch of
//! train markers along it and pushes their oriented outlines into a
//! [`render::RenderSink`]. Everything here is synchronous and free of I/O;
//! the map crate drives it from its frame loop.

pub mod animation;
pub mod geofence;
pub mod geometry;
pub mod hours;
pub mod marker;
pub mod render;
pub mod segment;

// Re-export transit from the transit crate
pub use liner_transit as transit;

pub mod prelude {
    pub use crate::animation::{AnimationConfig, ConfigError, Pace, Scheduler, TickReport};
    pub use crate::geofence::Geofence;
    pub use crate::geometry::{Geodesic, GeometryAdapter, Planar};
    pub use crate::hours::OperatingHours;
    pub use crate::marker::MarkerShape;
    pub use crate::render::RenderSink;
    pub use crate::segment::{resolve_segment, Segment, SegmentError};
}
