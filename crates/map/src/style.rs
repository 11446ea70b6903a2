use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::source::DataSources;

const DEFAULT_STYLE: &str = include_str!("../../../assets/map-style.json");

/// MapLibre style document.
///
/// Only `sources` and `layers` are modelled; everything else (terrain, sky,
/// glyphs) passes through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapStyle {
    pub version: u8,
    #[serde(default)]
    pub sources: Map<String, Value>,
    #[serde(default)]
    pub layers: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MapStyle {
    /// The bundled style with its GeoJSON sources pointed at `sources`.
    pub fn bundled(sources: &DataSources) -> Result<Self, serde_json::Error> {
        let mut style = Self::from_json(DEFAULT_STYLE)?;
        style.rewrite_data_sources(sources);
        Ok(style)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn layer(&self, id: &str) -> Option<&Value> {
        self.layers
            .iter()
            .find(|layer| layer.get("id").and_then(Value::as_str) == Some(id))
    }

    pub(crate) fn layer_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.layers
            .iter_mut()
            .find(|layer| layer.get("id").and_then(Value::as_str) == Some(id))
    }

    /// Drop the layer called `id`. Returns whether it existed.
    pub(crate) fn remove_layer(&mut self, id: &str) -> bool {
        let before = self.layers.len();
        self.layers
            .retain(|layer| layer.get("id").and_then(Value::as_str) != Some(id));
        self.layers.len() != before
    }

    fn rewrite_data_sources(&mut self, sources: &DataSources) {
        for (name, data) in sources.style_sources() {
            let Some(source) = self.sources.get_mut(name).and_then(Value::as_object_mut) else {
                tracing::warn!(source = name, "style has no source to point at data");
                continue;
            };

            if source.get("type").and_then(Value::as_str) == Some("geojson") {
                source.insert("data".to_string(), Value::String(data.to_string()));
            }
        }
    }
}

/// Initial map view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub pitch: f64,
    pub max_pitch: f64,
    pub bearing: f64,
    pub hash: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            center: [139.770692, 35.768351],
            zoom: 13.5,
            pitch: 30.0,
            max_pitch: 85.0,
            bearing: -80.0,
            hash: false,
        }
    }
}
