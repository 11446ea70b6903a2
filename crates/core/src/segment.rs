//! Directed sub-paths of a route between two stations.

use geo::{Closest, ClosestPoint, Coord, Line, LineString, MultiLineString, Point};

use crate::geometry::GeometryAdapter;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentError {
    #[error("route has fewer than two coordinates")]
    EmptyRoute,

    #[error("segment between stations is degenerate (length {length})")]
    DegenerateSegment { length: f64 },
}

/// The motion path of an animation run: ordered coordinates plus their arc
/// length in the geometry adapter's distance unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    line: LineString,
    length: f64,
}

impl Segment {
    pub fn line(&self) -> &LineString {
        &self.line
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn start(&self) -> Point {
        self.line.0[0].into()
    }

    pub fn end(&self) -> Point {
        self.line.0[self.line.0.len() - 1].into()
    }

    /// Position at `progress` (fraction of the length), clamped to `[0, 1]`.
    pub fn point_at(&self, geometry: &dyn GeometryAdapter, progress: f64) -> Point {
        let distance = self.length * progress.clamp(0.0, 1.0);
        geometry
            .along(&self.line, distance)
            .unwrap_or_else(|| self.end())
    }
}

/// Concatenate route parts into one coordinate sequence, preserving order.
///
/// Parts are assumed to be contiguous; no continuity check is made.
pub fn flatten_route(parts: &MultiLineString) -> LineString {
    LineString::new(parts.iter().flat_map(|part| part.0.iter().copied()).collect())
}

/// Where a point projects onto a line, ordered by position along it.
#[derive(Debug, Clone, Copy)]
struct Projection {
    line_index: usize,
    along: f64,
    coord: Coord,
}

impl Projection {
    fn precedes(&self, other: &Projection) -> bool {
        (self.line_index, self.along) <= (other.line_index, other.along)
    }
}

fn closest_on_line(line: Line, point: Point) -> Point {
    if line.start == line.end {
        return line.start.into();
    }

    match line.closest_point(&point) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => p,
        Closest::Indeterminate => line.start.into(),
    }
}

fn project(geometry: &dyn GeometryAdapter, route: &LineString, point: Point) -> Projection {
    let mut best: Option<(f64, Projection)> = None;

    for (line_index, line) in route.lines().enumerate() {
        let closest = closest_on_line(line, point);
        let distance = geometry.distance(point, closest);

        if best.as_ref().is_none_or(|(d, _)| distance < *d) {
            let projection = Projection {
                line_index,
                along: geometry.distance(line.start.into(), closest),
                coord: closest.into(),
            };
            best = Some((distance, projection));
        }
    }

    // Callers guarantee at least one line
    best.map(|(_, p)| p).unwrap_or(Projection {
        line_index: 0,
        along: 0.0,
        coord: route.0[0],
    })
}

/// Slice `route` between the projections of `start` and `end`, then reverse
/// the slice so travel runs against the route's digitized direction.
///
/// The result depends only on the inputs: swapping `start` and `end` yields
/// the same segment.
pub fn resolve_segment(
    geometry: &dyn GeometryAdapter,
    route: &MultiLineString,
    start: Point,
    end: Point,
) -> Result<Segment, SegmentError> {
    let flat = flatten_route(route);
    if flat.0.len() < 2 {
        return Err(SegmentError::EmptyRoute);
    }

    let a = project(geometry, &flat, start);
    let b = project(geometry, &flat, end);
    let (first, last) = if a.precedes(&b) { (a, b) } else { (b, a) };

    let mut coords = Vec::with_capacity(last.line_index - first.line_index + 2);
    coords.push(first.coord);
    coords.extend_from_slice(&flat.0[first.line_index + 1..=last.line_index]);
    coords.push(last.coord);
    coords.dedup();
    coords.reverse();

    let line = LineString::new(coords);
    let length = geometry.length(&line);

    if line.0.len() < 2 || length <= 0.0 || !length.is_finite() {
        tracing::warn!(length, "rejecting degenerate segment");
        return Err(SegmentError::DegenerateSegment { length });
    }

    tracing::debug!(
        length,
        coordinates = line.0.len(),
        "resolved route segment"
    );

    Ok(Segment { line, length })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geodesic, Planar};
    use approx::assert_abs_diff_eq;

    fn straight_route() -> MultiLineString {
        MultiLineString::new(vec![LineString::from(vec![
            (0.0, 0.0),
            (0.5, 0.0),
            (1.0, 0.0),
        ])])
    }

    #[test]
    fn test_flatten_preserves_order() {
        let parts = MultiLineString::new(vec![
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]),
            LineString::from(vec![(1.0, 0.0), (2.0, 1.0)]),
        ]);

        let flat = flatten_route(&parts);
        assert_eq!(
            flat,
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (2.0, 1.0)])
        );
    }

    #[test]
    fn test_resolve_reverses_digitized_direction() {
        let segment = resolve_segment(
            &Planar,
            &straight_route(),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        )
        .unwrap();

        assert_abs_diff_eq!(segment.length(), 1.0);
        assert_eq!(segment.start(), Point::new(1.0, 0.0));
        assert_eq!(segment.end(), Point::new(0.0, 0.0));
        assert_eq!(segment.line().0.len(), 3);
    }

    #[test]
    fn test_resolve_ignores_argument_order() {
        let route = straight_route();
        let forward =
            resolve_segment(&Planar, &route, Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap();
        let backward =
            resolve_segment(&Planar, &route, Point::new(1.0, 0.0), Point::new(0.0, 0.0)).unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let route = straight_route();
        let a = Point::new(0.1, 0.0);
        let b = Point::new(0.9, 0.0);

        assert_eq!(
            resolve_segment(&Planar, &route, a, b),
            resolve_segment(&Planar, &route, a, b)
        );
    }

    #[test]
    fn test_resolve_projects_off_route_stations() {
        let route = MultiLineString::new(vec![LineString::from(vec![
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
        ])]);

        let segment =
            resolve_segment(&Planar, &route, Point::new(0.2, 0.1), Point::new(1.1, 0.6)).unwrap();

        assert_abs_diff_eq!(segment.start().x(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(segment.start().y(), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(segment.end().x(), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(segment.end().y(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(segment.length(), 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_resolve_within_one_line() {
        let route = MultiLineString::new(vec![LineString::from(vec![(0.0, 0.0), (0.0, 4.0)])]);

        let segment =
            resolve_segment(&Planar, &route, Point::new(0.0, 3.0), Point::new(0.0, 1.0)).unwrap();

        assert_eq!(segment.start(), Point::new(0.0, 3.0));
        assert_eq!(segment.end(), Point::new(0.0, 1.0));
        assert_abs_diff_eq!(segment.length(), 2.0);
    }

    #[test]
    fn test_resolve_across_parts() {
        let route = MultiLineString::new(vec![
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]),
            LineString::from(vec![(1.0, 0.0), (2.0, 0.0)]),
        ]);

        let segment =
            resolve_segment(&Planar, &route, Point::new(0.5, 0.0), Point::new(1.5, 0.0)).unwrap();

        assert_eq!(
            segment.line(),
            &LineString::from(vec![(1.5, 0.0), (1.0, 0.0), (0.5, 0.0)])
        );
    }

    #[test]
    fn test_same_station_is_degenerate() {
        let err = resolve_segment(
            &Planar,
            &straight_route(),
            Point::new(0.5, 0.0),
            Point::new(0.5, 0.0),
        )
        .unwrap_err();

        assert!(matches!(err, SegmentError::DegenerateSegment { .. }));
    }

    #[test]
    fn test_empty_route() {
        let route = MultiLineString::new(vec![LineString::from(vec![(0.0, 0.0)])]);
        let err =
            resolve_segment(&Planar, &route, Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap_err();

        assert_eq!(err, SegmentError::EmptyRoute);
    }

    #[test]
    fn test_point_at_progress() {
        let segment = resolve_segment(
            &Planar,
            &straight_route(),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        )
        .unwrap();

        assert_eq!(segment.point_at(&Planar, 0.0), Point::new(1.0, 0.0));
        assert_eq!(segment.point_at(&Planar, 0.5), Point::new(0.5, 0.0));
        assert_eq!(segment.point_at(&Planar, 1.0), Point::new(0.0, 0.0));
        assert_eq!(segment.point_at(&Planar, 1.5), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_geodesic_length_in_kilometers() {
        let segment = resolve_segment(
            &Geodesic,
            &straight_route(),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        )
        .unwrap();

        assert_abs_diff_eq!(segment.length(), 111.19, epsilon = 0.1);
    }
}
