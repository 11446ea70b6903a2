use std::sync::Arc;
use std::time::Duration;

use liner_core::animation::AnimationConfig;
use liner_core::geofence::Geofence;
use liner_core::geometry::{Geodesic, GeometryAdapter, Planar};
use liner_core::hours::OperatingHours;
use serde::{Deserialize, Serialize};

use crate::paint::ExtrusionPaint;
use crate::source::DataSources;
use crate::style::CameraOptions;

/// Which distance model the segment and markers are measured in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    /// Great-circle kilometers
    #[default]
    Geodesic,
    /// Raw coordinate units
    Planar,
}

impl GeometryKind {
    pub fn adapter(self) -> Arc<dyn GeometryAdapter> {
        match self {
            GeometryKind::Geodesic => Arc::new(Geodesic),
            GeometryKind::Planar => Arc::new(Planar),
        }
    }
}

/// Everything the demo page needs, loadable from one JSON document.
/// Missing keys take the defaults of the Toei Nippori-Toneri liner demo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub sources: DataSources,

    /// Display name of the station the segment starts at
    pub origin: String,
    pub destination: String,

    pub geometry: GeometryKind,
    pub animation: AnimationConfig,
    pub camera: CameraOptions,
    pub paint: ExtrusionPaint,

    pub geofence: Geofence,
    pub operating_hours: OperatingHours,

    pub frame_interval_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sources: DataSources::default(),
            origin: "見沼代親水公園".to_string(),
            destination: "日暮里".to_string(),
            geometry: GeometryKind::default(),
            animation: AnimationConfig::default(),
            camera: CameraOptions::default(),
            paint: ExtrusionPaint::default(),
            geofence: Geofence::default(),
            operating_hours: OperatingHours::default(),
            frame_interval_ms: 16,
        }
    }
}

impl DemoConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}
