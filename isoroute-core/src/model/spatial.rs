//! Nearest-segment lookup over the road network

use geo::{Line, Point};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::network::Segment;
use crate::{Error, Mode, SegmentId};

/// Single straight piece of a segment polyline, in longitude/latitude
pub type IndexedLine = GeomWithData<Line<f64>, SegmentId>;

/// One R-tree per mode holding the pieces of every segment usable by that mode
#[derive(Debug)]
pub struct SpatialIndex {
    trees: [RTree<IndexedLine>; 3],
}

impl SpatialIndex {
    pub(crate) fn build(segments: &[Segment]) -> Self {
        let trees = Mode::ALL.map(|mode| {
            let lines: Vec<IndexedLine> = segments
                .iter()
                .filter(|segment| segment.costs.allows(mode))
                .flat_map(|segment| {
                    segment
                        .geographic
                        .lines()
                        .map(move |line| GeomWithData::new(line, segment.id))
                })
                .collect();
            RTree::bulk_load(lines)
        });

        Self { trees }
    }

    /// Closest segment usable by `mode`, measured to the segment polyline.
    ///
    /// Returns the segment identifier and the squared distance in degrees.
    /// Equidistant candidates resolve to the lowest identifier.
    pub fn nearest_segment(&self, point: &Point<f64>, mode: Mode) -> Result<(SegmentId, f64), Error> {
        let mut candidates = self.trees[mode.index()].nearest_neighbor_iter_with_distance_2(point);

        let (first, best_distance) = candidates
            .next()
            .ok_or(Error::NoApplicableSegment(mode))?;

        let best_id = candidates
            .take_while(|(_, distance)| *distance <= best_distance)
            .map(|(line, _)| line.data)
            .fold(first.data, SegmentId::min);

        Ok((best_id, best_distance))
    }

    pub fn len(&self, mode: Mode) -> usize {
        self.trees[mode.index()].size()
    }

    pub fn is_empty(&self, mode: Mode) -> bool {
        self.len(mode) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::ModeCosts;

    fn segment(id: SegmentId, coords: &[(f64, f64)], costs: ModeCosts) -> Segment {
        let geographic: geo::LineString<f64> = coords.to_vec().into();
        Segment {
            id,
            source: id * 10,
            target: id * 10 + 1,
            geometry: geographic.clone(),
            geographic,
            length_km: 1.0,
            costs,
            name: None,
        }
    }

    #[test]
    fn nearest_respects_mode_filter() {
        let walk_only = ModeCosts::new(Some(1.0), None, None);
        let all = ModeCosts::new(Some(1.0), Some(1.0), Some(1.0));
        let segments = vec![
            segment(1, &[(0.0, 0.0), (1.0, 0.0)], walk_only),
            segment(2, &[(0.0, 1.0), (1.0, 1.0)], all),
        ];
        let index = SpatialIndex::build(&segments);

        let query = Point::new(0.5, 0.1);
        assert_eq!(index.nearest_segment(&query, Mode::Walk).unwrap().0, 1);
        let (id, distance_2) = index.nearest_segment(&query, Mode::Car).unwrap();
        assert_eq!(id, 2);
        assert!((distance_2 - 0.81).abs() < 1e-9);
    }

    #[test]
    fn distance_is_measured_to_the_polyline_not_its_box() {
        // An L-shaped segment whose bounding box contains the query point
        let bent = ModeCosts::new(Some(1.0), None, None);
        let segments = vec![
            segment(1, &[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0)], bent),
            segment(2, &[(1.5, 0.5), (1.5, 0.8)], bent),
        ];
        let index = SpatialIndex::build(&segments);
        let (id, _) = index.nearest_segment(&Point::new(1.0, 1.0), Mode::Walk).unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn ties_resolve_to_lowest_identifier() {
        let costs = ModeCosts::new(Some(1.0), None, None);
        let segments = vec![
            segment(9, &[(0.0, 1.0), (1.0, 1.0)], costs),
            segment(4, &[(0.0, -1.0), (1.0, -1.0)], costs),
        ];
        let index = SpatialIndex::build(&segments);
        let (id, _) = index.nearest_segment(&Point::new(0.5, 0.0), Mode::Walk).unwrap();
        assert_eq!(id, 4);
    }

    #[test]
    fn missing_mode_is_reported() {
        let segments = vec![segment(
            1,
            &[(0.0, 0.0), (1.0, 0.0)],
            ModeCosts::new(Some(1.0), None, None),
        )];
        let index = SpatialIndex::build(&segments);
        assert!(index.is_empty(Mode::Bike));
        assert!(matches!(
            index.nearest_segment(&Point::new(0.0, 0.0), Mode::Bike),
            Err(Error::NoApplicableSegment(Mode::Bike))
        ));
    }
}
