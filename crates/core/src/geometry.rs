//! Distance, bearing and projection primitives behind one interface.
//!
//! Two conventions are provided. [`Planar`] treats coordinates as a flat
//! Euclidean plane and measures in coordinate units. [`Geodesic`] treats them
//! as longitude/latitude, measures great-circle distances in kilometers and
//! rotates local shapes along rhumb lines.
//!
//! All bearings are degrees clockwise from north.

use geo::{
    HaversineBearing, HaversineDistance, HaversineIntermediate, LineString, Point, RhumbBearing,
    RhumbDestination, RhumbDistance,
};

const METERS_PER_KILOMETER: f64 = 1000.0;

pub trait GeometryAdapter: Send + Sync {
    /// Path distance between two points.
    fn distance(&self, from: Point, to: Point) -> f64;

    /// Direction of travel from `from` towards `to`.
    fn bearing(&self, from: Point, to: Point) -> f64;

    /// Point a `fraction` of the way from `from` to `to`.
    fn interpolate(&self, from: Point, to: Point, fraction: f64) -> Point;

    /// Distance and bearing of `point` as seen from `origin` in the local frame
    /// used for marker rotation.
    fn polar(&self, origin: Point, point: Point) -> (f64, f64);

    /// Inverse of [`GeometryAdapter::polar`].
    fn offset(&self, origin: Point, bearing: f64, distance: f64) -> Point;

    /// Arc length of a line.
    fn length(&self, line: &LineString) -> f64 {
        line.lines()
            .map(|l| self.distance(l.start.into(), l.end.into()))
            .sum()
    }

    /// Point at `distance` along `line`, clamped to its ends.
    ///
    /// Returns `None` for a line without coordinates.
    fn along(&self, line: &LineString, distance: f64) -> Option<Point> {
        let first = line.0.first()?;
        if distance <= 0.0 {
            return Some((*first).into());
        }

        let mut travelled = 0.0;
        for l in line.lines() {
            let (start, end): (Point, Point) = (l.start.into(), l.end.into());
            let step = self.distance(start, end);

            if step > 0.0 && travelled + step >= distance {
                return Some(self.interpolate(start, end, (distance - travelled) / step));
            }
            travelled += step;
        }

        line.0.last().map(|c| (*c).into())
    }
}

/// Flat-plane geometry in coordinate units.
#[derive(Clone, Copy, Debug, Default)]
pub struct Planar;

impl GeometryAdapter for Planar {
    fn distance(&self, from: Point, to: Point) -> f64 {
        (to.x() - from.x()).hypot(to.y() - from.y())
    }

    fn bearing(&self, from: Point, to: Point) -> f64 {
        (to.x() - from.x()).atan2(to.y() - from.y()).to_degrees()
    }

    fn interpolate(&self, from: Point, to: Point, fraction: f64) -> Point {
        Point::new(
            from.x() + (to.x() - from.x()) * fraction,
            from.y() + (to.y() - from.y()) * fraction,
        )
    }

    fn polar(&self, origin: Point, point: Point) -> (f64, f64) {
        (self.distance(origin, point), self.bearing(origin, point))
    }

    fn offset(&self, origin: Point, bearing: f64, distance: f64) -> Point {
        let radians = bearing.to_radians();
        Point::new(
            origin.x() + distance * radians.sin(),
            origin.y() + distance * radians.cos(),
        )
    }
}

/// Longitude/latitude geometry measured in kilometers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Geodesic;

impl GeometryAdapter for Geodesic {
    fn distance(&self, from: Point, to: Point) -> f64 {
        from.haversine_distance(&to) / METERS_PER_KILOMETER
    }

    fn bearing(&self, from: Point, to: Point) -> f64 {
        from.haversine_bearing(to)
    }

    fn interpolate(&self, from: Point, to: Point, fraction: f64) -> Point {
        from.haversine_intermediate(&to, fraction)
    }

    // Rhumb in both directions so `offset` inverts `polar`
    fn polar(&self, origin: Point, point: Point) -> (f64, f64) {
        (
            origin.rhumb_distance(&point) / METERS_PER_KILOMETER,
            origin.rhumb_bearing(point),
        )
    }

    fn offset(&self, origin: Point, bearing: f64, distance: f64) -> Point {
        origin.rhumb_destination(bearing, distance * METERS_PER_KILOMETER)
    }
}

/// Compass bearing normalized into `[0, 360)`.
pub fn normalize_bearing(bearing: f64) -> f64 {
    bearing.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_planar_bearings_are_compass_style() {
        let origin = Point::new(0.0, 0.0);

        assert_abs_diff_eq!(Planar.bearing(origin, Point::new(0.0, 1.0)), 0.0);
        assert_abs_diff_eq!(Planar.bearing(origin, Point::new(1.0, 0.0)), 90.0);
        assert_abs_diff_eq!(Planar.bearing(origin, Point::new(-1.0, 0.0)), -90.0);
        assert_abs_diff_eq!(
            normalize_bearing(Planar.bearing(origin, Point::new(0.0, -1.0))),
            180.0
        );
    }

    #[test]
    fn test_planar_offset_inverts_polar() {
        let origin = Point::new(2.0, 3.0);
        let point = Point::new(2.5, 1.0);

        let (distance, bearing) = Planar.polar(origin, point);
        let back = Planar.offset(origin, bearing, distance);

        assert_abs_diff_eq!(back.x(), point.x(), epsilon = 1e-12);
        assert_abs_diff_eq!(back.y(), point.y(), epsilon = 1e-12);
    }

    #[test]
    fn test_planar_length_and_along() {
        let line = LineString::from(vec![(0.0, 0.0), (0.5, 0.0), (1.0, 0.0), (1.0, 1.0)]);

        assert_abs_diff_eq!(Planar.length(&line), 2.0);
        assert_eq!(Planar.along(&line, 0.0), Some(Point::new(0.0, 0.0)));
        assert_eq!(Planar.along(&line, 0.75), Some(Point::new(0.75, 0.0)));
        assert_eq!(Planar.along(&line, 1.5), Some(Point::new(1.0, 0.5)));

        // Clamped to the end of the line
        assert_eq!(Planar.along(&line, 10.0), Some(Point::new(1.0, 1.0)));
        assert_eq!(Planar.along(&LineString::new(vec![]), 1.0), None);
    }

    #[test]
    fn test_along_skips_repeated_vertices() {
        let line = LineString::from(vec![(0.0, 0.0), (0.0, 0.0), (0.0, 2.0)]);
        assert_eq!(Planar.along(&line, 1.0), Some(Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_geodesic_distance_in_kilometers() {
        // One degree of longitude at the equator is roughly 111.2 km
        let d = Geodesic.distance(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert_abs_diff_eq!(d, 111.19, epsilon = 0.1);

        let bearing = Geodesic.bearing(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert_abs_diff_eq!(bearing, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_geodesic_offset_inverts_polar() {
        let origin = Point::new(139.7710, 35.7281);
        let point = Point::new(139.77145, 35.7291);

        let (distance, bearing) = Geodesic.polar(origin, point);
        let back = Geodesic.offset(origin, bearing, distance);

        assert_abs_diff_eq!(back.x(), point.x(), epsilon = 1e-9);
        assert_abs_diff_eq!(back.y(), point.y(), epsilon = 1e-9);
    }
}
