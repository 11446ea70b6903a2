//! Oriented arrow-shaped train markers.

use geo::{Coord, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

use crate::geometry::GeometryAdapter;

/// Local marker outline in map coordinate units: a `width` x `height`
/// rectangle whose front corners are cut back by `nose` towards an apex.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerShape {
    pub width: f64,
    pub height: f64,
    pub nose: f64,
}

impl Default for MarkerShape {
    fn default() -> Self {
        Self {
            width: 0.0009,
            height: 0.002,
            nose: 0.0003,
        }
    }
}

impl MarkerShape {
    /// Unrotated closed outline centered on `center`, nose pointing north.
    pub fn outline(&self, center: Point) -> LineString {
        let (x, y) = (center.x(), center.y());
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        LineString::new(vec![
            Coord { x: x - half_w, y: y - half_h },             // rear left
            Coord { x: x + half_w, y: y - half_h },             // rear right
            Coord { x: x + half_w, y: y + half_h - self.nose }, // front right
            Coord { x, y: y + half_h },                         // apex
            Coord { x: x - half_w, y: y + half_h - self.nose }, // front left
            Coord { x: x - half_w, y: y - half_h },
        ])
    }

    /// Marker polygon at `position` facing `heading` degrees.
    pub fn build(&self, geometry: &dyn GeometryAdapter, position: Point, heading: f64) -> Polygon {
        let ring = rotate_ring(geometry, &self.outline(position), heading, position);
        Polygon::new(ring, vec![])
    }
}

/// Rotate every vertex of `ring` about `origin` by `heading` degrees
/// clockwise, keeping each vertex's distance from the origin.
pub fn rotate_ring(
    geometry: &dyn GeometryAdapter,
    ring: &LineString,
    heading: f64,
    origin: Point,
) -> LineString {
    ring.0
        .iter()
        .map(|coord| {
            let (distance, bearing) = geometry.polar(origin, (*coord).into());
            geometry.offset(origin, bearing + heading, distance)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geodesic, Planar};
    use approx::assert_abs_diff_eq;
    use geo::Centroid;

    const HEADINGS: [f64; 6] = [0.0, 37.5, 90.0, 180.0, -135.0, 359.0];

    fn assert_ring_eq(a: &LineString, b: &LineString, epsilon: f64) {
        assert_eq!(a.0.len(), b.0.len());
        for (p, q) in a.0.iter().zip(b.0.iter()) {
            assert_abs_diff_eq!(p.x, q.x, epsilon = epsilon);
            assert_abs_diff_eq!(p.y, q.y, epsilon = epsilon);
        }
    }

    #[test]
    fn test_marker_is_closed_six_point_ring() {
        let shape = MarkerShape::default();
        let position = Point::new(139.7710, 35.7281);

        for heading in HEADINGS {
            let polygon = shape.build(&Geodesic, position, heading);
            let ring = polygon.exterior();

            assert_eq!(ring.0.len(), 6);
            assert_eq!(ring.0.first(), ring.0.last());
        }
    }

    #[test]
    fn test_centroid_stays_near_position() {
        let shape = MarkerShape::default();
        let tolerance = shape.height / 4.0;

        for (geometry, position) in [
            (&Planar as &dyn GeometryAdapter, Point::new(0.0, 0.0)),
            (&Geodesic as &dyn GeometryAdapter, Point::new(139.7710, 35.7281)),
        ] {
            for heading in HEADINGS {
                let centroid = shape
                    .build(geometry, position, heading)
                    .centroid()
                    .unwrap();

                assert_abs_diff_eq!(centroid.x(), position.x(), epsilon = tolerance);
                assert_abs_diff_eq!(centroid.y(), position.y(), epsilon = tolerance);
            }
        }
    }

    #[test]
    fn test_heading_points_the_nose() {
        let shape = MarkerShape::default();
        let polygon = shape.build(&Planar, Point::new(1.0, 1.0), 90.0);
        let apex = polygon.exterior().0[3];

        assert_abs_diff_eq!(apex.x, 1.0 + shape.height / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(apex.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_round_trip() {
        let shape = MarkerShape::default();

        for (geometry, origin) in [
            (&Planar as &dyn GeometryAdapter, Point::new(0.0, 0.0)),
            (&Geodesic as &dyn GeometryAdapter, Point::new(139.7704, 35.8140)),
        ] {
            let outline = shape.outline(origin);
            for heading in HEADINGS {
                let rotated = rotate_ring(geometry, &outline, heading, origin);
                let restored = rotate_ring(geometry, &rotated, -heading, origin);

                assert_ring_eq(&restored, &outline, 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_heading_keeps_outline() {
        let shape = MarkerShape::default();
        let origin = Point::new(0.0, 0.0);
        let polygon = shape.build(&Planar, origin, 0.0);

        assert_ring_eq(polygon.exterior(), &shape.outline(origin), 1e-12);
    }
}
