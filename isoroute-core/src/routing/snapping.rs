//! Point snapping onto the nearest road usable by a mode

use geo::{Closest, ClosestPoint, Distance, Euclidean, Point};
use log::{debug, trace};

use crate::{Error, Mode, RoadNetwork, SegmentId, VertexId};

/// A query point projected onto its nearest usable segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub segment: SegmentId,
    /// Segment endpoints, usable as graph entry vertices
    pub source: VertexId,
    pub target: VertexId,
    /// Raw query point (lon/lat)
    pub query: Point<f64>,
    /// Projected point on the segment (lon/lat)
    pub point: Point<f64>,
    /// Distance between query and projected point in meters
    pub distance: f64,
}

impl SnapResult {
    pub fn vertices(&self) -> [VertexId; 2] {
        [self.source, self.target]
    }
}

/// Snaps `point` (lon/lat) onto the closest segment usable by `mode`.
///
/// # Errors
///
/// `NoRoadNearPoint` if no segment allows the mode, the point is not a finite
/// coordinate, or the snapped position lies farther than the network's
/// `max_snap_distance`.
pub fn snap(network: &RoadNetwork, point: Point<f64>, mode: Mode) -> Result<SnapResult, Error> {
    let no_road = || Error::NoRoadNearPoint {
        mode,
        lon: point.x(),
        lat: point.y(),
    };

    if !(point.x().is_finite() && point.y().is_finite()) {
        return Err(no_road());
    }

    let (segment_id, _) = network
        .spatial()
        .nearest_segment(&point, mode)
        .map_err(|_| no_road())?;
    let segment = network.segment(segment_id).ok_or_else(no_road)?;

    let projection = network.projection();
    let metric_query = projection.to_metric(point);
    let metric_snapped = match segment.geometry.closest_point(&metric_query) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => p,
        Closest::Indeterminate => return Err(no_road()),
    };
    let distance = Euclidean.distance(metric_query, metric_snapped);

    if distance > network.meta.max_snap_distance {
        debug!(
            "Point ({}, {}) is {distance:.0} m from segment {segment_id}, beyond {} m",
            point.x(),
            point.y(),
            network.meta.max_snap_distance
        );
        return Err(no_road());
    }

    trace!(
        "Snapped ({}, {}) to segment {segment_id} at {distance:.1} m for {mode}",
        point.x(),
        point.y()
    );

    Ok(SnapResult {
        segment: segment_id,
        source: segment.source,
        target: segment.target,
        query: point,
        point: projection.to_geographic(metric_snapped),
        distance,
    })
}

impl RoadNetwork {
    /// See [`snap`]
    ///
    /// # Errors
    ///
    /// `NoRoadNearPoint` when nothing usable lies within reach
    pub fn snap(&self, point: Point<f64>, mode: Mode) -> Result<SnapResult, Error> {
        snap(self, point, mode)
    }
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;
    use crate::model::{ModeCosts, NetworkMeta, SegmentRecord};

    fn network() -> RoadNetwork {
        let records = vec![
            SegmentRecord {
                id: 1,
                source: 10,
                target: 11,
                geometry: line_string![(x: -42_000.0, y: 105_000.0), (x: -41_000.0, y: 105_000.0)],
                length_km: Some(1.0),
                costs: ModeCosts::new(Some(12.0), None, None),
                name: None,
            },
            SegmentRecord {
                id: 2,
                source: 11,
                target: 12,
                geometry: line_string![(x: -41_000.0, y: 105_000.0), (x: -41_000.0, y: 106_000.0)],
                length_km: Some(1.0),
                costs: ModeCosts::new(Some(12.0), Some(4.0), None),
                name: None,
            },
        ];
        RoadNetwork::new(records, NetworkMeta::default()).unwrap()
    }

    #[test]
    fn point_on_segment_snaps_in_place() {
        let network = network();
        let on_road = network
            .projection()
            .to_geographic(Point::new(-41_500.0, 105_000.0));

        let snapped = network.snap(on_road, Mode::Walk).unwrap();
        assert_eq!(snapped.segment, 1);
        assert_eq!(snapped.vertices(), [10, 11]);
        assert!(snapped.distance < 1e-3);
        assert!((snapped.point.x() - on_road.x()).abs() < 1e-7);
        assert!((snapped.point.y() - on_road.y()).abs() < 1e-7);
    }

    #[test]
    fn projection_is_orthogonal_and_clamped() {
        let network = network();
        let projection = network.projection();

        let beside = projection.to_geographic(Point::new(-41_500.0, 105_100.0));
        let snapped = network.snap(beside, Mode::Walk).unwrap();
        assert!((snapped.distance - 100.0).abs() < 0.01);

        // Past the end of segment 2 the snap lands on its endpoint
        let beyond = projection.to_geographic(Point::new(-41_000.0, 106_300.0));
        let snapped = network.snap(beyond, Mode::Bike).unwrap();
        assert_eq!(snapped.segment, 2);
        assert!((snapped.distance - 300.0).abs() < 0.01);
        let end = projection.to_metric(snapped.point);
        assert!((end.y() - 106_000.0).abs() < 1e-3);
    }

    #[test]
    fn mode_filter_and_distance_limit_reject_points() {
        let network = network();
        let projection = network.projection();

        let near = projection.to_geographic(Point::new(-41_500.0, 105_000.0));
        assert!(matches!(
            network.snap(near, Mode::Car),
            Err(Error::NoRoadNearPoint { mode: Mode::Car, .. })
        ));

        let far = projection.to_geographic(Point::new(-41_500.0, 110_000.0));
        assert!(matches!(
            network.snap(far, Mode::Walk),
            Err(Error::NoRoadNearPoint { .. })
        ));

        assert!(network.snap(Point::new(f64::NAN, 40.0), Mode::Walk).is_err());
    }
}
