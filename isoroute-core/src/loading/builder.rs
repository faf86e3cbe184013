use log::info;

use super::config::{NetworkConfig, NetworkFormat};
use super::parser::{read_csv_segments, read_geojson_segments};
use crate::{Error, RoadNetwork};

/// Creates a road network from the snapshot named in the configuration
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or holds invalid segments
pub fn create_road_network(config: &NetworkConfig) -> Result<RoadNetwork, Error> {
    validate_config(config)?;
    let format = config.format()?;

    info!(
        "Loading road network ({format:?}): {}",
        config.network_path.display()
    );

    let records = match format {
        NetworkFormat::GeoJson => read_geojson_segments(&config.network_path)?,
        NetworkFormat::Csv => read_csv_segments(&config.network_path)?,
    };
    info!("Read {} segment records", records.len());

    let network = RoadNetwork::new(records, config.meta())?;

    info!("Road network created successfully");
    Ok(network)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if !config.network_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "Network snapshot not found: {}",
                config.network_path.display()
            ),
        )));
    }

    let concavity = config.isochrone.concavity;
    if !(concavity > 0.0 && concavity <= 1.0) {
        return Err(Error::InvalidData(format!(
            "isochrone concavity must be in (0, 1], got {concavity}"
        )));
    }

    Ok(())
}
