//! Data model for network routing
//!
//! Contains the travel modes, the road network store with its per-mode
//! graphs, the spatial index and the metric projection.

pub mod mode;
pub mod network;
pub mod projection;
pub mod spatial;

pub use mode::{Mode, ModeInfo};
pub use network::{
    ModeCosts, ModeEdge, ModeGraph, NetworkMeta, NetworkSummary, RoadNetwork, Segment,
    SegmentRecord, Vertex,
};
pub use projection::{Projection, ProjectionParams};
pub use spatial::SpatialIndex;
