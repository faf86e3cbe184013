//! Road network store: segments, vertices and per-mode graphs

pub mod components;
pub mod mode_graph;
pub mod road_network;

pub use components::{ModeCosts, Segment, SegmentRecord, Vertex};
pub use mode_graph::{ModeEdge, ModeGraph};
pub use road_network::{ModeSummary, NetworkMeta, NetworkSummary, RoadNetwork};
