//! Isochrone polygons synthesized from reachable segment sets.
//!
//! The polygon shape depends on how many segments were reached: a single
//! segment is buffered, two segments are wrapped by a buffered convex hull
//! and larger sets use a concave hull in the metric CRS.
//!
//! The configured concavity is a ratio of the convex hull area: `1.0` keeps
//! the convex hull and lower values select a tighter concave hull.

use std::collections::BTreeSet;

use geo::algorithm::concave_hull::ConcaveHullOptions;
use geo::{
    Area, Buffer, ConcaveHull, ConvexHull, Coord, MapCoords, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use log::{debug, warn};
use rayon::prelude::*;
use serde_json::json;

use super::reachability::reachable_edges_multi;
use crate::{Error, Mode, RoadNetwork, Segment, SegmentId};

/// Convex hulls below this metric area (m²) are treated as collinear
const MIN_HULL_AREA: f64 = 1.0;

/// Concave hull parameters tried when fitting a hull to an area ratio,
/// from nearly convex to detailed
const HULL_CONCAVITIES: [f64; 11] = [16.0, 8.0, 4.0, 3.0, 2.0, 1.5, 1.2, 1.0, 0.9, 0.8, 0.6];

/// Isochrone for one cutoff; `polygon` is `None` when nothing was reached
#[derive(Debug, Clone, PartialEq)]
pub struct Isochrone {
    pub cutoff: u32,
    pub mode: Mode,
    pub segment_count: usize,
    pub polygon: Option<Polygon<f64>>,
}

impl Isochrone {
    pub fn to_feature(&self) -> Result<Option<Feature>, Error> {
        let Some(polygon) = &self.polygon else {
            return Ok(None);
        };

        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeoJsonValue::from(polygon)),
            "properties": {
                "minutes": self.cutoff,
                "mode": self.mode,
            }
        });

        Feature::from_json_value(value)
            .map(Some)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

/// Polygon covering `segments` (lon/lat), or `None` for an empty set.
///
/// Unknown identifiers are ignored.
pub fn build_isochrone(
    network: &RoadNetwork,
    segments: &BTreeSet<SegmentId>,
    cutoff: u32,
) -> Option<Polygon<f64>> {
    let reached: Vec<&Segment> = segments
        .iter()
        .filter_map(|&id| network.segment(id))
        .collect();
    let config = &network.meta.isochrone;

    match reached.as_slice() {
        [] => None,
        [single] => {
            let radius = f64::from(cutoff) * config.buffer_meters_per_minute;
            let buffered = largest_polygon(single.geometry.buffer(radius))?;
            Some(to_geographic(network, &buffered))
        }
        [_, _] => buffered_hull(&reached, config.hull_buffer),
        _ => {
            let points: MultiPoint<f64> = reached
                .iter()
                .flat_map(|segment| segment.geometry.points())
                .collect();

            let convex = points.convex_hull();
            if convex.unsigned_area() < MIN_HULL_AREA {
                debug!(
                    "{} collinear segments, using buffered hull",
                    reached.len()
                );
                return buffered_hull(&reached, config.hull_buffer);
            }

            let hull = fitted_hull(&points, convex, config.concavity);
            Some(to_geographic(network, &hull))
        }
    }
}

/// Hull of `points` whose area is closest to `ratio` times the convex hull
/// area. A ratio of `1.0` or more returns `convex` itself.
fn fitted_hull(points: &MultiPoint<f64>, convex: Polygon<f64>, ratio: f64) -> Polygon<f64> {
    if ratio >= 1.0 {
        return convex;
    }

    let target = ratio * convex.unsigned_area();
    let distance = |polygon: &Polygon<f64>| (polygon.unsigned_area() - target).abs();

    let best = HULL_CONCAVITIES
        .iter()
        .map(|&concavity| {
            points.concave_hull_with_options(ConcaveHullOptions {
                concavity,
                ..Default::default()
            })
        })
        .filter(|hull| hull.unsigned_area() >= MIN_HULL_AREA)
        .min_by(|a, b| distance(a).total_cmp(&distance(b)));

    match best {
        Some(hull) if distance(&hull) <= distance(&convex) => hull,
        Some(_) => convex,
        None => {
            warn!("Degenerate concave hull, falling back to convex hull");
            convex
        }
    }
}

/// Convex hull of the lon/lat coordinates buffered by `distance` degrees.
/// A zero-area hull buffers the lines themselves.
fn buffered_hull(segments: &[&Segment], distance: f64) -> Option<Polygon<f64>> {
    let lines: MultiLineString<f64> = segments
        .iter()
        .map(|segment| segment.geographic.clone())
        .collect();
    let hull = lines.convex_hull();

    if hull.unsigned_area() > 0.0 {
        largest_polygon(hull.buffer(distance))
    } else {
        largest_polygon(lines.buffer(distance))
    }
}

fn largest_polygon(polygons: MultiPolygon<f64>) -> Option<Polygon<f64>> {
    polygons
        .into_iter()
        .filter(|polygon| polygon.unsigned_area() > 0.0)
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
}

fn to_geographic(network: &RoadNetwork, polygon: &Polygon<f64>) -> Polygon<f64> {
    let projection = network.projection();
    polygon.map_coords(|coord: Coord<f64>| projection.inverse(coord))
}

/// Isochrones for `cutoffs` around `origin` (lon/lat), in input order.
///
/// # Errors
///
/// `InvalidCutoff` for a zero cutoff, `NoRoadNearPoint` if the origin cannot
/// be snapped.
pub fn isochrone(
    network: &RoadNetwork,
    origin: Point<f64>,
    mode: Mode,
    cutoffs: &[u32],
) -> Result<Vec<Isochrone>, Error> {
    let sets = reachable_edges_multi(network, origin, mode, cutoffs)?;

    Ok(sets
        .par_iter()
        .map(|set| Isochrone {
            cutoff: set.cutoff,
            mode,
            segment_count: set.len(),
            polygon: build_isochrone(network, &set.segments, set.cutoff),
        })
        .collect())
}

/// Isochrones for many origins computed in parallel.
/// Each origin fails or succeeds independently.
pub fn bulk_isochrones(
    network: &RoadNetwork,
    origins: &[Point<f64>],
    mode: Mode,
    cutoffs: &[u32],
) -> Vec<Result<Vec<Isochrone>, Error>> {
    origins
        .par_iter()
        .map(|&origin| isochrone(network, origin, mode, cutoffs))
        .collect()
}

/// `GeoJSON` collection with one Polygon feature per non-empty isochrone
pub fn isochrones_to_geojson(isochrones: &[Isochrone]) -> Result<FeatureCollection, Error> {
    let features = isochrones
        .iter()
        .filter_map(|isochrone| isochrone.to_feature().transpose())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn isochrones_to_geojson_string(isochrones: &[Isochrone]) -> Result<String, Error> {
    serde_json::to_string(&isochrones_to_geojson(isochrones)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use geo::{BoundingRect, LineString, line_string};

    use super::*;
    use crate::VertexId;
    use crate::model::{ModeCosts, NetworkMeta, SegmentRecord};

    fn record(id: SegmentId, source: VertexId, target: VertexId, line: LineString<f64>) -> SegmentRecord {
        SegmentRecord {
            id,
            source,
            target,
            geometry: line,
            length_km: None,
            costs: ModeCosts::new(Some(2.0), Some(1.0), None),
            name: None,
        }
    }

    /// Star around vertex 1 at (-41000, 105000) with arms of 300 m
    fn star() -> RoadNetwork {
        star_with(NetworkMeta::default())
    }

    fn star_with(meta: NetworkMeta) -> RoadNetwork {
        let (cx, cy) = (-41_000.0, 105_000.0);
        RoadNetwork::new(
            vec![
                record(1, 1, 2, line_string![(x: cx, y: cy), (x: cx + 300.0, y: cy)]),
                record(2, 1, 3, line_string![(x: cx, y: cy), (x: cx, y: cy + 300.0)]),
                record(3, 1, 4, line_string![(x: cx, y: cy), (x: cx - 300.0, y: cy)]),
                record(4, 1, 5, line_string![(x: cx, y: cy), (x: cx, y: cy - 300.0)]),
                record(5, 6, 7, line_string![(x: cx + 300.0, y: cy + 600.0), (x: cx + 600.0, y: cy + 600.0)]),
                record(6, 7, 8, line_string![(x: cx + 600.0, y: cy + 600.0), (x: cx + 900.0, y: cy + 600.0)]),
                record(7, 8, 9, line_string![(x: cx + 900.0, y: cy + 600.0), (x: cx + 1200.0, y: cy + 600.0)]),
            ],
            meta,
        )
        .unwrap()
    }

    fn ids(list: &[SegmentId]) -> BTreeSet<SegmentId> {
        list.iter().copied().collect()
    }

    fn metric_height(network: &RoadNetwork, polygon: &Polygon<f64>) -> f64 {
        let projection = network.projection();
        let metric = polygon.map_coords(|c: Coord<f64>| projection.forward(c));
        let rect = metric.bounding_rect().unwrap();
        rect.height()
    }

    #[test]
    fn empty_set_has_no_polygon() {
        let network = star();
        assert!(build_isochrone(&network, &BTreeSet::new(), 5).is_none());
        assert!(build_isochrone(&network, &ids(&[42]), 5).is_none());
    }

    #[test]
    fn single_segment_is_buffered_by_cutoff_minutes() {
        let network = star();
        let polygon = build_isochrone(&network, &ids(&[1]), 5).unwrap();
        assert!(polygon.unsigned_area() > 0.0);
        // Horizontal 300 m segment buffered by 300 m on each side
        let height = metric_height(&network, &polygon);
        assert!((height - 600.0).abs() < 1.0, "height {height}");
    }

    #[test]
    fn two_segments_use_buffered_convex_hull() {
        let network = star();
        let polygon = build_isochrone(&network, &ids(&[1, 2]), 5).unwrap();
        assert!(polygon.unsigned_area() > 0.0);

        // Collinear pair falls back to buffering the lines
        let polygon = build_isochrone(&network, &ids(&[1, 3]), 5).unwrap();
        assert!(polygon.unsigned_area() > 0.0);
    }

    #[test]
    fn many_segments_use_concave_hull() {
        let network = star();
        let polygon = build_isochrone(&network, &ids(&[1, 2, 3, 4]), 5).unwrap();
        assert!(polygon.unsigned_area() > 0.0);
        let height = metric_height(&network, &polygon);
        assert!((height - 600.0).abs() < 1.0, "height {height}");

        // Three collinear segments take the buffered hull path
        let polygon = build_isochrone(&network, &ids(&[5, 6, 7]), 5).unwrap();
        assert!(polygon.unsigned_area() > 0.0);
    }

    #[test]
    fn unit_concavity_returns_the_convex_hull() {
        let mut meta = NetworkMeta::default();
        meta.isochrone.concavity = 1.0;
        let network = star_with(meta);

        let polygon = build_isochrone(&network, &ids(&[1, 2, 3, 4]), 5).unwrap();
        let projection = network.projection();
        let metric = polygon.map_coords(|c: Coord<f64>| projection.forward(c));
        // Diamond with 600 m diagonals
        let area = metric.unsigned_area();
        assert!((area - 180_000.0).abs() < 10.0, "area {area}");
    }

    #[test]
    fn nearly_collinear_segments_use_buffered_hull() {
        let (cx, cy) = (-41_000.0, 105_000.0);
        let network = RoadNetwork::new(
            vec![
                record(1, 1, 2, line_string![(x: cx, y: cy), (x: cx + 300.0, y: cy + 0.001)]),
                record(2, 2, 3, line_string![(x: cx + 300.0, y: cy + 0.001), (x: cx + 600.0, y: cy)]),
                record(3, 3, 4, line_string![(x: cx + 600.0, y: cy), (x: cx + 900.0, y: cy + 0.001)]),
            ],
            NetworkMeta::default(),
        )
        .unwrap();

        let polygon = build_isochrone(&network, &ids(&[1, 2, 3]), 5).unwrap();
        // 0.0003 degrees of latitude on each side is about 33 m
        let height = metric_height(&network, &polygon);
        assert!(height > 50.0, "height {height}");
    }

    #[test]
    fn isochrones_keep_cutoff_order_and_grow() {
        let network = star();
        let origin = network
            .projection()
            .to_geographic(Point::new(-40_900.0, 105_010.0));

        let result = isochrone(&network, origin, Mode::Walk, &[4, 2, 1]).unwrap();
        let cutoffs: Vec<u32> = result.iter().map(|iso| iso.cutoff).collect();
        assert_eq!(cutoffs, vec![4, 2, 1]);
        assert!(result[2].polygon.is_none());
        assert_eq!(result[1].segment_count, 4);
        assert_eq!(result[0].segment_count, 4);

        let collection = isochrones_to_geojson(&result).unwrap();
        assert_eq!(collection.features.len(), 2);
        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(properties["minutes"], 4);
        assert_eq!(properties["mode"], "walk");
    }

    #[test]
    fn bulk_results_are_per_origin() {
        let network = star();
        let projection = network.projection();
        let origins = vec![
            projection.to_geographic(Point::new(-40_900.0, 105_010.0)),
            projection.to_geographic(Point::new(0.0, 0.0)),
        ];
        let results = bulk_isochrones(&network, &origins, Mode::Bike, &[5]);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::NoRoadNearPoint { .. })));
    }
}
