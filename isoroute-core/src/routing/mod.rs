//! Point snapping and shortest-path routing over the per-mode graphs

pub mod dijkstra;
pub mod itinerary;
pub mod route;
pub mod snapping;

pub use route::{Connector, ConnectorRole, PathResult, PathStep, route};
pub use snapping::{SnapResult, snap};
