use clap::Args;
use isoroute_core::{Mode, RoadNetwork, route};
use tracing::info;
use wkt::ToWkt;

use crate::error::CliError;
use crate::model::LatLon;

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Origin as LAT,LON
    #[arg(long, allow_hyphen_values = true)]
    pub from: LatLon,
    /// Destination as LAT,LON
    #[arg(long, allow_hyphen_values = true)]
    pub to: LatLon,
    #[arg(long, default_value = "walk")]
    pub mode: Mode,
    /// Print the trip as a WKT LINESTRING instead of GeoJSON
    #[arg(long)]
    pub wkt: bool,
}

pub fn run(network: &RoadNetwork, args: &RouteArgs) -> Result<String, CliError> {
    let path = route(network, args.from.to_point(), args.to.to_point(), args.mode)?;

    info!(
        mode = %args.mode,
        segments = path.steps.len(),
        distance_km = path.distance_km,
        duration_min = path.duration_minutes,
        "route found"
    );

    if args.wkt {
        Ok(path.to_line(network).wkt_string())
    } else {
        Ok(path.to_geojson_string(network)?)
    }
}
