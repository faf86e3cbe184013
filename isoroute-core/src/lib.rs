//! Routing and isochrone engine over a static regional road network.
//!
//! The network is loaded once into a [`RoadNetwork`], which holds the
//! segments, one weighted graph per travel [`Mode`] and the spatial index
//! used for snapping. Queries borrow the network immutably, so a single
//! instance can serve any number of concurrent requests.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

pub use algo::isochrone::{
    Isochrone, build_isochrone, bulk_isochrones, isochrone, isochrones_to_geojson,
    isochrones_to_geojson_string,
};
pub use algo::reachability::{ReachableSet, reachable_edges, reachable_edges_multi};
pub use loading::{IsochroneConfig, NetworkConfig, NetworkFormat, create_road_network};
pub use model::{Mode, Projection, ProjectionParams, RoadNetwork, Segment, SegmentRecord};
pub use routing::{Connector, ConnectorRole, PathResult, PathStep, SnapResult, route, snap};

/// Identifier of a road segment, stable across loads of the same snapshot
pub type SegmentId = i64;
/// Identifier of a network vertex
pub type VertexId = i64;
/// Travel time in minutes
pub type Minutes = f64;
