//! Point-to-point shortest path on a mode graph

use geo::{LineString, Point};
use log::{debug, warn};

use super::dijkstra::{TracedPath, shortest_path};
use super::snapping::{SnapResult, snap};
use crate::{Error, Minutes, Mode, RoadNetwork, SegmentId, VertexId};

/// One traversed segment of a path
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    /// 1-based position along the path
    pub seq: usize,
    /// Vertex the segment is entered from
    pub node: VertexId,
    pub segment: SegmentId,
    /// Mode cost of the segment in minutes
    pub cost: Minutes,
    pub length_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorRole {
    Origin,
    Destination,
}

impl ConnectorRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        }
    }
}

/// Zero-cost straight link between a raw query point and its snapped position
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub role: ConnectorRole,
    pub geometry: LineString<f64>,
}

impl Connector {
    fn origin(snap: &SnapResult) -> Self {
        Self {
            role: ConnectorRole::Origin,
            geometry: LineString::from(vec![snap.query.0, snap.point.0]),
        }
    }

    fn destination(snap: &SnapResult) -> Self {
        Self {
            role: ConnectorRole::Destination,
            geometry: LineString::from(vec![snap.point.0, snap.query.0]),
        }
    }
}

/// Result of a successful route query
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub mode: Mode,
    pub origin: SnapResult,
    pub destination: SnapResult,
    /// Graph vertices the path starts and ends at
    pub start_vertex: VertexId,
    pub end_vertex: VertexId,
    pub steps: Vec<PathStep>,
    /// Sum of traversed segment lengths
    pub distance_km: f64,
    /// Nominal travel time derived from `distance_km` and the mode speed
    pub duration_minutes: Minutes,
    /// Sum of the per-segment mode costs
    pub graph_cost: Minutes,
    /// Origin connector first, destination connector second
    pub connectors: [Connector; 2],
}

impl PathResult {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn segment_ids(&self) -> Vec<SegmentId> {
        self.steps.iter().map(|step| step.segment).collect()
    }

    /// Segment geometries oriented in travel direction (lon/lat)
    pub fn oriented_geometries(&self, network: &RoadNetwork) -> Vec<LineString<f64>> {
        self.steps
            .iter()
            .filter_map(|step| {
                let segment = network.segment(step.segment)?;
                let mut line = segment.geographic.clone();
                if segment.source != step.node {
                    line.0.reverse();
                }
                Some(line)
            })
            .collect()
    }

    /// The whole trip as one line: connectors and segments joined end to end
    pub fn to_line(&self, network: &RoadNetwork) -> LineString<f64> {
        let mut coords = self.connectors[0].geometry.0.clone();
        for line in self.oriented_geometries(network) {
            coords.extend(line.0);
        }
        coords.extend(self.connectors[1].geometry.0.iter().copied());
        coords.dedup();
        LineString::from(coords)
    }
}

/// Shortest path between two lon/lat points for `mode`.
///
/// Both points are snapped to their nearest usable segment. The four
/// endpoint combinations are tried in order and the first one producing a
/// non-empty path wins.
///
/// # Errors
///
/// `NoRoadNearPoint` if either point cannot be snapped, `NoRouteFound` if no
/// combination connects and none shares a vertex.
pub fn route(
    network: &RoadNetwork,
    origin: Point<f64>,
    destination: Point<f64>,
    mode: Mode,
) -> Result<PathResult, Error> {
    let origin = snap(network, origin, mode)?;
    let destination = snap(network, destination, mode)?;
    let graph = network.graph(mode);

    let mut coincident: Option<VertexId> = None;
    let mut found: Option<(VertexId, VertexId, TracedPath)> = None;

    'search: for from in origin.vertices() {
        for to in destination.vertices() {
            if from == to {
                coincident.get_or_insert(from);
                continue;
            }
            let (Some(start), Some(target)) = (graph.node(from), graph.node(to)) else {
                warn!("Vertex pair ({from}, {to}) missing from the {mode} graph");
                continue;
            };
            match shortest_path(graph, start, target) {
                Some(path) if !path.is_empty() => {
                    found = Some((from, to, path));
                    break 'search;
                }
                _ => debug!("No {mode} path between vertices {from} and {to}"),
            }
        }
    }

    let (start_vertex, end_vertex, steps) = match found {
        Some((from, to, path)) => {
            let steps: Vec<PathStep> = path
                .edges
                .iter()
                .zip(&path.nodes)
                .enumerate()
                .map(|(idx, (&edge, &node))| {
                    let edge = graph.edge(edge);
                    PathStep {
                        seq: idx + 1,
                        node: graph.vertex(node),
                        segment: edge.segment,
                        cost: edge.cost,
                        length_km: edge.length_km,
                    }
                })
                .collect();
            (from, to, steps)
        }
        None => match coincident {
            Some(vertex) => {
                debug!("Origin and destination share vertex {vertex}, returning empty path");
                (vertex, vertex, Vec::new())
            }
            None => return Err(Error::NoRouteFound(mode)),
        },
    };

    let distance_km: f64 = steps.iter().map(|step| step.length_km).sum();
    let graph_cost: Minutes = steps.iter().map(|step| step.cost).sum();

    Ok(PathResult {
        mode,
        connectors: [Connector::origin(&origin), Connector::destination(&destination)],
        origin,
        destination,
        start_vertex,
        end_vertex,
        steps,
        distance_km,
        duration_minutes: mode.travel_minutes(distance_km),
        graph_cost,
    })
}
