//! Core traits for transit entities.
//!
//! These traits define the public interface for transit data.
//! Implementations can be in-memory or backed by remote files.

use geo::{MultiLineString, Point};
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::types::*;

// ============================================================================
// Core Entity Traits
// ============================================================================

/// A transit route (e.g., "Nippori-Toneri Liner")
pub trait Route: Send + Sync {
    fn id(&self) -> &RouteIdentifier;

    /// Display name, may be empty
    fn name(&self) -> &str;

    /// Physical path the route takes, as digitized parts in order.
    /// Consumers flatten the parts before slicing.
    fn geometry(&self) -> &MultiLineString;
}

/// A transit station (single boarding location)
pub trait TransitStation: Send + Sync {
    fn id(&self) -> &StationIdentifier;
    fn name(&self) -> &str;
    fn location(&self) -> Point;
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Source of station data
pub trait TransitProvider: Send + Sync {
    /// First station whose display name matches exactly
    fn station_by_name(&self, name: &str) -> Result<Arc<dyn TransitStation>>;
}
