//! Concrete station and route types, and an in-memory station lookup.

use std::collections::HashMap;
use std::sync::Arc;

use geo::{MultiLineString, Point};

use crate::identifiers::*;
use crate::models::{traits::*, types::*};

// ============================================================================
// Concrete Implementations of Traits
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct StationImpl {
    pub id: StationIdentifier,
    pub name: Arc<str>,
    pub location: Point,
}

impl TransitStation for StationImpl {
    fn id(&self) -> &StationIdentifier {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Point {
        self.location
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteImpl {
    pub id: RouteIdentifier,
    pub name: Arc<str>,
    pub geometry: MultiLineString,
}

impl Route for RouteImpl {
    fn id(&self) -> &RouteIdentifier {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn geometry(&self) -> &MultiLineString {
        &self.geometry
    }
}

// ============================================================================
// Static Provider
// ============================================================================

/// In-memory station lookup
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone, Default)]
pub struct StaticTransitProvider {
    // Core data, in dataset order
    stations: Vec<Arc<StationImpl>>,

    // Lookup map; the first station carrying a name owns it
    by_name: HashMap<Arc<str>, Arc<StationImpl>>,
}

impl StaticTransitProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Build provider from parsed stops, keeping dataset order
    pub fn from_stations(stations: Vec<StationImpl>) -> Self {
        let stations: Vec<Arc<StationImpl>> = stations.into_iter().map(Arc::new).collect();

        let mut by_name = HashMap::with_capacity(stations.len());
        for station in &stations {
            by_name
                .entry(station.name.clone())
                .or_insert_with(|| station.clone());
        }

        Self { stations, by_name }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl TransitProvider for StaticTransitProvider {
    fn station_by_name(&self, name: &str) -> Result<Arc<dyn TransitStation>> {
        self.by_name
            .get(name)
            .map(|s| s.clone() as Arc<dyn TransitStation>)
            .ok_or_else(|| TransitError::StationNotFound(name.to_string()))
    }
}
