//! This module is responsible for loading road network snapshots
//! (GeoJSON or CSV with WKT geometry) and building the routing model.

mod builder;
mod config;
mod parser;
mod raw_types;

pub use builder::create_road_network;
pub use config::{IsochroneConfig, NetworkConfig, NetworkFormat};
pub use parser::{
    parse_csv_segments, parse_geojson_segments, read_csv_segments, read_geojson_segments,
};
pub use raw_types::RawSegment;
