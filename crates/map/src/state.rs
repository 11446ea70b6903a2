use geo::Polygon;
use geojson::{Feature, Geometry, JsonObject};
use liner_core::render::RenderSink;
use liner_transit::TrainIdentifier;
use serde_json::{Value, json};

use crate::paint::ExtrusionPaint;
use crate::style::{CameraOptions, MapStyle};

/// The map document the animation draws into.
///
/// Each train owns one GeoJSON source and one fill-extrusion layer, both
/// named after the train id.
#[derive(Clone, Debug)]
pub struct MapState {
    style: MapStyle,
    camera: CameraOptions,
    paint: ExtrusionPaint,
}

impl MapState {
    pub fn new(style: MapStyle, camera: CameraOptions, paint: ExtrusionPaint) -> Self {
        Self {
            style,
            camera,
            paint,
        }
    }

    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    pub fn camera(&self) -> &CameraOptions {
        &self.camera
    }

    pub fn style_json(&self) -> Result<String, serde_json::Error> {
        self.style.to_json()
    }

    /// GeoJSON data currently held by the source called `id`.
    pub fn source_data(&self, id: &str) -> Option<&Value> {
        self.style.sources.get(id).and_then(|source| source.get("data"))
    }

    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.style.sources.keys().map(String::as_str)
    }

    /// Ids of every train currently on the map.
    pub fn train_ids(&self) -> Vec<&str> {
        self.style
            .layers
            .iter()
            .filter(|layer| layer.get("type").and_then(Value::as_str) == Some("fill-extrusion"))
            .filter_map(|layer| layer.get("source").and_then(Value::as_str))
            .filter(|source| source.starts_with(TrainIdentifier::PREFIX))
            .collect()
    }

    fn layer_json(&self, id: &TrainIdentifier) -> Value {
        json!({
            "id": id.as_str(),
            "type": "fill-extrusion",
            "source": id.as_str(),
            "paint": self.paint.to_json(),
        })
    }
}

fn marker_feature(polygon: &Polygon) -> Value {
    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(polygon))),
        id: None,
        properties: Some(JsonObject::new()),
        foreign_members: None,
    };
    Value::Object(JsonObject::from(&feature))
}

impl RenderSink for MapState {
    fn has_geometry(&self, id: &TrainIdentifier) -> bool {
        self.style.sources.contains_key(id.as_str())
    }

    fn upsert(&mut self, id: &TrainIdentifier, polygon: &Polygon) {
        let data = marker_feature(polygon);

        if let Some(source) = self.style.sources.get_mut(id.as_str()) {
            source["data"] = data;
            return;
        }

        tracing::debug!(train = %id, "adding train source and layer");
        self.style.sources.insert(
            id.as_str().to_string(),
            json!({ "type": "geojson", "data": data }),
        );

        // A stale layer without its source would break the style
        let new_layer = self.layer_json(id);
        match self.style.layer_mut(id.as_str()) {
            Some(layer) => *layer = new_layer,
            None => {
                self.style.layers.push(new_layer);
            }
        }
    }

    fn remove(&mut self, id: &TrainIdentifier) {
        let had_layer = self.style.remove_layer(id.as_str());
        let had_source = self.style.sources.remove(id.as_str()).is_some();

        if had_layer || had_source {
            tracing::debug!(train = %id, "removed train source and layer");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DataSources;
    use geo::{LineString, polygon};

    fn state() -> MapState {
        MapState::new(
            MapStyle::bundled(&DataSources::default()).unwrap(),
            CameraOptions::default(),
            ExtrusionPaint::default(),
        )
    }

    fn square(offset: f64) -> Polygon {
        polygon![
            (x: offset, y: 0.0),
            (x: offset + 1.0, y: 0.0),
            (x: offset + 1.0, y: 1.0),
            (x: offset, y: 1.0),
        ]
    }

    #[test]
    fn test_upsert_creates_source_and_layer() {
        let mut state = state();
        let id = TrainIdentifier::from_sequence(0);
        let layers_before = state.style().layers.len();

        assert!(!state.has_geometry(&id));
        state.upsert(&id, &square(0.0));

        assert!(state.has_geometry(&id));
        assert_eq!(state.style().layers.len(), layers_before + 1);
        assert_eq!(state.train_ids(), vec!["train-0"]);

        let layer = state.style().layer("train-0").unwrap();
        assert_eq!(layer["type"], "fill-extrusion");
        assert_eq!(layer["source"], "train-0");
        assert_eq!(layer["paint"]["fill-extrusion-color"], "#00ff00");

        let data = state.source_data("train-0").unwrap();
        assert_eq!(data["geometry"]["type"], "Polygon");
        assert_eq!(data["geometry"]["coordinates"][0][1], json!([1.0, 0.0]));
    }

    #[test]
    fn test_marker_feature_is_closed_polygon() {
        let data = marker_feature(&square(0.0));
        let feature = Feature::from_json_value(data.clone()).unwrap();
        assert_eq!(feature.properties, Some(JsonObject::new()));

        match feature.geometry.map(|g| g.value) {
            Some(geojson::Value::Polygon(rings)) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[0].first(), rings[0].last());
                assert_eq!(rings[0][1], vec![1.0, 0.0]);
            }
            other => panic!("expected a polygon, got {other:?}"),
        }
        assert_eq!(data["type"], "Feature");
    }

    #[test]
    fn test_upsert_replaces_only_data() {
        let mut state = state();
        let id = TrainIdentifier::from_sequence(3);

        state.upsert(&id, &square(0.0));
        let layers = state.style().layers.len();
        state.upsert(&id, &square(5.0));

        assert_eq!(state.style().layers.len(), layers);
        assert_eq!(state.train_ids().len(), 1);
        assert_eq!(
            state.source_data("train-3").unwrap()["geometry"]["coordinates"][0][0],
            json!([5.0, 0.0])
        );
    }

    #[test]
    fn test_remove_drops_both() {
        let mut state = state();
        let id = TrainIdentifier::from_sequence(1);
        let sources_before = state.source_ids().count();

        state.upsert(&id, &square(0.0));
        state.remove(&id);

        assert!(!state.has_geometry(&id));
        assert!(state.style().layer("train-1").is_none());
        assert_eq!(state.source_ids().count(), sources_before);

        // Removing again is harmless
        state.remove(&id);
    }

    #[test]
    fn test_style_json_includes_trains() {
        let mut state = state();
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1.0), (0.0, 0.0)]);
        state.upsert(&TrainIdentifier::from_sequence(0), &Polygon::new(ring, vec![]));

        let reparsed = MapStyle::from_json(&state.style_json().unwrap()).unwrap();
        assert!(reparsed.sources.contains_key("train-0"));
        assert!(reparsed.layer("train-0").is_some());
    }
}
