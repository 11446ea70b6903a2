//! Fixed polygonal regions for location gating.

use geo::{Coord, Intersects, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

/// A fixed region. Points on the boundary count as inside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct Geofence {
    polygon: Polygon,
}

impl Geofence {
    pub fn new(polygon: Polygon) -> Self {
        Self { polygon }
    }

    /// Sample fence around central Tokyo.
    pub fn tokyo() -> Self {
        Self::from(vec![
            [139.6897, 35.6895],
            [139.7937, 35.6895],
            [139.7937, 35.7815],
            [139.6897, 35.7815],
            [139.6897, 35.6895],
        ])
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn contains(&self, point: Point) -> bool {
        self.polygon.intersects(&point)
    }
}

impl Default for Geofence {
    fn default() -> Self {
        Self::tokyo()
    }
}

impl From<Vec<[f64; 2]>> for Geofence {
    fn from(ring: Vec<[f64; 2]>) -> Self {
        let exterior: LineString = ring
            .into_iter()
            .map(|[x, y]| Coord { x, y })
            .collect();
        Self::new(Polygon::new(exterior, vec![]))
    }
}

impl From<Geofence> for Vec<[f64; 2]> {
    fn from(fence: Geofence) -> Self {
        fence
            .polygon
            .exterior()
            .coords()
            .map(|c| [c.x, c.y])
            .collect()
    }
}
