use std::path::Path;
use std::str::FromStr;

use geo::Point;
use isoroute_core::{Mode, RoadNetwork, create_road_network};
use tracing::info;

use crate::config::AppConfig;
use crate::error::CliError;

/// `lat,lon` pair as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl FromStr for LatLon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LON, got '{s}'"))?;
        let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
        let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude: {e}"))?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(format!("coordinate out of range: {lat},{lon}"));
        }
        Ok(Self { lat, lon })
    }
}

pub fn load_network(app_config: &AppConfig, network: Option<&Path>) -> Result<RoadNetwork, CliError> {
    let config = app_config.network_config(network)?;
    let network = create_road_network(&config)?;

    let summary = network.summary();
    info!(
        segments = summary.segments,
        vertices = summary.vertices,
        "network ready"
    );
    Ok(network)
}

pub fn modes_json() -> Result<String, CliError> {
    let modes: serde_json::Map<String, serde_json::Value> = Mode::ALL
        .iter()
        .map(|mode| Ok((mode.as_str().to_string(), serde_json::to_value(mode.info())?)))
        .collect::<Result<_, serde_json::Error>>()?;

    Ok(serde_json::to_string_pretty(&modes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lon_pairs() {
        let at: LatLon = "40.6412, -8.6540".parse().unwrap();
        assert_eq!(at, LatLon { lat: 40.6412, lon: -8.6540 });
        assert_eq!(at.to_point(), Point::new(-8.6540, 40.6412));

        assert!("40.6412".parse::<LatLon>().is_err());
        assert!("north,-8.65".parse::<LatLon>().is_err());
        assert!("95.0,-8.65".parse::<LatLon>().is_err());
    }

    #[test]
    fn modes_are_listed_with_metadata() {
        let json: serde_json::Value = serde_json::from_str(&modes_json().unwrap()).unwrap();
        assert_eq!(json["walk"]["speed_kmh"], 5.0);
        assert_eq!(json["bike"]["icon"], "bicycle");
        assert_eq!(json["walk"]["cost_field"], "cost_walk");
        assert_eq!(json["car"]["cost_field"], "cost");
    }
}
