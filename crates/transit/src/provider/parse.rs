//! Parse stop and route feature collections.
//!
//! Stops are Point features carrying a `stop_name` property (and optionally
//! `stop_id`). The route is the first feature of its collection, either a
//! LineString or a MultiLineString whose parts are kept in digitized order.

use geo::{Coord, LineString, MultiLineString, Point};
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::identifiers::*;
use crate::models::types::*;
use crate::provider::static_provider::{RouteImpl, StationImpl};

fn read_collection(bytes: &[u8]) -> Result<FeatureCollection> {
    let geojson: GeoJson = serde_json::from_slice(bytes)?;

    FeatureCollection::try_from(geojson)
        .map_err(|e| TransitError::InvalidData(format!("expected a FeatureCollection: {e}")))
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn position_to_coord(position: &[f64]) -> Result<Coord> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(TransitError::InvalidData(format!(
            "position needs at least 2 values, got {}",
            position.len()
        ))),
    }
}

fn positions_to_linestring(positions: &[Vec<f64>]) -> Result<LineString> {
    positions
        .iter()
        .map(|p| position_to_coord(p))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

/// Parse a stops feature collection into stations, in dataset order.
///
/// Features without a name or without a point geometry are skipped.
pub fn parse_stops(bytes: &[u8]) -> Result<Vec<StationImpl>> {
    let collection = read_collection(bytes)?;
    Ok(stations_from_collection(&collection))
}

fn stations_from_collection(collection: &FeatureCollection) -> Vec<StationImpl> {
    let mut stations = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.iter().enumerate() {
        let Some(name) = string_property(feature, "stop_name") else {
            tracing::warn!(index, "skipping stop without stop_name");
            continue;
        };

        let location = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::Point(position)) => match position_to_coord(position) {
                Ok(coord) => Point::from(coord),
                Err(e) => {
                    tracing::warn!(index, %name, error = %e, "skipping stop with invalid point");
                    continue;
                }
            },
            _ => {
                tracing::warn!(index, %name, "skipping stop without point geometry");
                continue;
            }
        };

        let id = string_property(feature, "stop_id").unwrap_or_else(|| name.clone());

        stations.push(StationImpl {
            id: StationIdentifier::new(id),
            name: name.into(),
            location,
        });
    }

    tracing::debug!(count = stations.len(), "parsed stops");
    stations
}

/// Parse a route feature collection. Only the first feature is used.
pub fn parse_route(bytes: &[u8]) -> Result<RouteImpl> {
    let collection = read_collection(bytes)?;

    let feature = collection
        .features
        .first()
        .ok_or_else(|| TransitError::InvalidData("route collection has no features".into()))?;

    let geometry = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(geojson::Value::LineString(positions)) => {
            MultiLineString::new(vec![positions_to_linestring(positions)?])
        }
        Some(geojson::Value::MultiLineString(parts)) => MultiLineString::new(
            parts
                .iter()
                .map(|part| positions_to_linestring(part))
                .collect::<Result<Vec<_>>>()?,
        ),
        _ => {
            return Err(TransitError::InvalidData(
                "route feature must be a LineString or MultiLineString".into(),
            ))
        }
    };

    let id = string_property(feature, "route_id").unwrap_or_else(|| "route".to_string());
    let name = string_property(feature, "route_long_name")
        .or_else(|| string_property(feature, "name"))
        .unwrap_or_default();

    Ok(RouteImpl {
        id: RouteIdentifier::new(id),
        name: name.into(),
        geometry,
    })
}
