use serde::{Deserialize, Serialize};

/// Locations of the GeoJSON data the map draws and the route is resolved
/// from. Relative paths are resolved by the [`DataFetcher`] in use.
///
/// [`DataFetcher`]: liner_transit::network::traits::DataFetcher
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub stops: String,
    pub route: String,
    pub stop_buffer: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self::under("./data")
    }
}

impl DataSources {
    /// The standard file names below `base`.
    pub fn under(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            stops: format!("{base}/stops.geojson"),
            route: format!("{base}/route.geojson"),
            stop_buffer: format!("{base}/stops_buffer.geojson"),
        }
    }

    /// Style source names paired with the data location they load.
    pub(crate) fn style_sources(&self) -> [(&'static str, &str); 3] {
        [
            ("stop", &self.stops),
            ("route", &self.route),
            ("geofence", &self.stop_buffer),
        ]
    }
}
