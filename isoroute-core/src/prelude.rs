pub use crate::Error;

// Network model and loading
pub use crate::loading::{IsochroneConfig, NetworkConfig, NetworkFormat, create_road_network};
pub use crate::model::{Mode, ModeInfo, Projection, RoadNetwork, SegmentRecord};

// Queries
pub use crate::algo::isochrone::{Isochrone, bulk_isochrones, isochrone, isochrones_to_geojson};
pub use crate::algo::reachability::{ReachableSet, reachable_edges, reachable_edges_multi};
pub use crate::routing::{PathResult, SnapResult, route};

// Core scalar types
pub use crate::Minutes;
pub use crate::SegmentId;
pub use crate::VertexId;
