//! Road network components - segment records, segments, vertices and mode costs

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::{Error, Minutes, Mode, SegmentId, VertexId};

/// Traversal cost of a segment for each mode, in minutes.
/// `None` marks the mode as forbidden on the segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeCosts {
    pub walk: Option<Minutes>,
    pub bike: Option<Minutes>,
    pub car: Option<Minutes>,
}

impl ModeCosts {
    pub fn new(walk: Option<Minutes>, bike: Option<Minutes>, car: Option<Minutes>) -> Self {
        Self { walk, bike, car }
    }

    pub fn get(&self, mode: Mode) -> Option<Minutes> {
        match mode {
            Mode::Walk => self.walk,
            Mode::Bike => self.bike,
            Mode::Car => self.car,
        }
    }

    pub fn allows(&self, mode: Mode) -> bool {
        self.get(mode).is_some()
    }

    /// Rejects zero, negative and non-finite costs
    pub(crate) fn validate(&self, segment: SegmentId) -> Result<(), Error> {
        for mode in Mode::ALL {
            if let Some(value) = self.get(mode)
                && !(value.is_finite() && value > 0.0)
            {
                return Err(Error::InvalidModeCost {
                    segment,
                    mode,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Segment as delivered by a network snapshot, geometry in the metric CRS
#[derive(Debug, Clone)]
pub struct SegmentRecord {
    pub id: SegmentId,
    pub source: VertexId,
    pub target: VertexId,
    pub geometry: LineString<f64>,
    /// Computed from the geometry when the snapshot does not carry it
    pub length_km: Option<f64>,
    pub costs: ModeCosts,
    pub name: Option<String>,
}

/// Validated road segment owned by the network
#[derive(Debug, Clone)]
pub struct Segment {
    pub id: SegmentId,
    pub source: VertexId,
    pub target: VertexId,
    /// Polyline in the metric CRS
    pub geometry: LineString<f64>,
    /// Same polyline in longitude/latitude
    pub geographic: LineString<f64>,
    pub length_km: f64,
    pub costs: ModeCosts,
    pub name: Option<String>,
}

impl Segment {
    pub fn cost(&self, mode: Mode) -> Option<Minutes> {
        self.costs.get(mode)
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.source, self.target)
    }
}

/// Network vertex
#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexId,
    /// Longitude/latitude
    pub geometry: Point<f64>,
}
