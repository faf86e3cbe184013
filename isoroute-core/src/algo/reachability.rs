//! Segments reachable from an origin within a travel-time budget

use std::collections::BTreeSet;

use geo::Point;
use hashbrown::HashMap;
use log::{debug, trace};

use crate::routing::dijkstra::dijkstra_path_weights;
use crate::routing::{SnapResult, snap};
use crate::{Error, Minutes, Mode, RoadNetwork, SegmentId};

/// Distinct segments fully traversable within `cutoff` minutes
#[derive(Debug, Clone, PartialEq)]
pub struct ReachableSet {
    pub mode: Mode,
    pub cutoff: u32,
    pub origin: SnapResult,
    pub segments: BTreeSet<SegmentId>,
}

impl ReachableSet {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Segments reachable from `origin` (lon/lat) within `cutoff` minutes.
///
/// The search starts at the source vertex of the snapped segment. A segment
/// is reachable when one of its endpoints is reached with enough budget left
/// to traverse it entirely.
///
/// # Errors
///
/// `InvalidCutoff` for a zero cutoff, `NoRoadNearPoint` if the origin cannot
/// be snapped.
pub fn reachable_edges(
    network: &RoadNetwork,
    origin: Point<f64>,
    mode: Mode,
    cutoff: u32,
) -> Result<ReachableSet, Error> {
    let mut sets = reachable_edges_multi(network, origin, mode, &[cutoff])?;
    sets.pop().ok_or(Error::InvalidCutoff(cutoff))
}

/// Reachable segments for several cutoffs from a single search bounded by
/// the largest one. Results follow the order of `cutoffs`.
///
/// # Errors
///
/// `InvalidCutoff` if any cutoff is zero, `NoRoadNearPoint` if the origin
/// cannot be snapped.
pub fn reachable_edges_multi(
    network: &RoadNetwork,
    origin: Point<f64>,
    mode: Mode,
    cutoffs: &[u32],
) -> Result<Vec<ReachableSet>, Error> {
    if let Some(&zero) = cutoffs.iter().find(|&&cutoff| cutoff == 0) {
        return Err(Error::InvalidCutoff(zero));
    }
    let Some(&max_cutoff) = cutoffs.iter().max() else {
        return Ok(Vec::new());
    };

    let snapped = snap(network, origin, mode)?;
    let completion = segment_completion_times(network, &snapped, mode, f64::from(max_cutoff))?;
    debug!(
        "{} {mode} segments within {max_cutoff} min of segment {}",
        completion.len(),
        snapped.segment
    );

    Ok(cutoffs
        .iter()
        .map(|&cutoff| {
            let budget = f64::from(cutoff);
            let segments: BTreeSet<SegmentId> = completion
                .iter()
                .filter(|&(_, &time)| time <= budget)
                .map(|(&segment, _)| segment)
                .collect();
            trace!("Cutoff {cutoff} min: {} segments", segments.len());
            ReachableSet {
                mode,
                cutoff,
                origin: snapped,
                segments,
            }
        })
        .collect())
}

/// Earliest time each segment can be fully traversed, for segments
/// finishing within `budget`
fn segment_completion_times(
    network: &RoadNetwork,
    snapped: &SnapResult,
    mode: Mode,
    budget: Minutes,
) -> Result<HashMap<SegmentId, Minutes>, Error> {
    let graph = network.graph(mode);
    let start = graph.node(snapped.source).ok_or(Error::NoRoadNearPoint {
        mode,
        lon: snapped.query.x(),
        lat: snapped.query.y(),
    })?;

    let labels = dijkstra_path_weights(graph, start, Some(budget));

    let mut completion: HashMap<SegmentId, Minutes> = HashMap::new();
    for (&node, &reached) in &labels {
        for (_, _, edge) in graph.incident(node) {
            let finish = reached + edge.cost;
            if finish > budget {
                continue;
            }
            completion
                .entry(edge.segment)
                .and_modify(|best| *best = best.min(finish))
                .or_insert(finish);
        }
    }

    Ok(completion)
}
