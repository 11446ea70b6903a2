use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use geo::Polygon;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

/// Convert a marker polygon to a GeoJSON value
fn polygon_to_geojson(poly: &Polygon<f64>) -> Value {
    let exterior: Vec<Vec<f64>> = poly
        .exterior()
        .0
        .iter()
        .map(|c| vec![c.x, c.y])
        .collect();

    Value::Polygon(vec![exterior])
}

/// One feature per marker on the map at `frame`
pub fn frame_features(frame: usize, markers: &BTreeMap<String, Polygon<f64>>) -> Vec<Feature> {
    markers
        .iter()
        .map(|(train, poly)| {
            let mut properties = serde_json::Map::new();
            properties.insert("train".to_string(), serde_json::json!(train));
            properties.insert("frame".to_string(), serde_json::json!(frame));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(polygon_to_geojson(poly))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect()
}

/// Write all recorded frames to a single feature collection
pub fn write_frames_geojson(features: Vec<Feature>, output_path: &Path) -> Result<()> {
    tracing::info!(
        features = features.len(),
        path = %output_path.display(),
        "writing frames"
    );

    let feature_collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let geojson = GeoJson::from(feature_collection);
    let json_string =
        serde_json::to_string_pretty(&geojson).context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
