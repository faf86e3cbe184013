use clap::Args;
use isoroute_core::{Mode, RoadNetwork, isochrone, isochrones_to_geojson_string};
use tracing::{info, warn};
use wkt::ToWkt;

use crate::error::CliError;
use crate::model::LatLon;

#[derive(Debug, Args)]
pub struct IsochroneArgs {
    /// Origin as LAT,LON
    #[arg(long, allow_hyphen_values = true)]
    pub at: LatLon,
    #[arg(long, default_value = "walk")]
    pub mode: Mode,
    /// Comma separated cutoffs in minutes
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "5,10,15",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub minutes: Vec<u32>,
    /// Print one `minutes<TAB>WKT` line per cutoff instead of GeoJSON
    #[arg(long)]
    pub wkt: bool,
}

pub fn run(network: &RoadNetwork, args: &IsochroneArgs) -> Result<String, CliError> {
    let rings = isochrone(network, args.at.to_point(), args.mode, &args.minutes)?;

    for ring in &rings {
        if ring.polygon.is_none() {
            warn!(minutes = ring.cutoff, "nothing reachable");
        } else {
            info!(minutes = ring.cutoff, segments = ring.segment_count, "isochrone built");
        }
    }

    if args.wkt {
        Ok(rings
            .iter()
            .filter_map(|ring| {
                let polygon = ring.polygon.as_ref()?;
                Some(format!("{}\t{}", ring.cutoff, polygon.wkt_string()))
            })
            .collect::<Vec<_>>()
            .join("\n"))
    } else {
        Ok(isochrones_to_geojson_string(&rings)?)
    }
}
