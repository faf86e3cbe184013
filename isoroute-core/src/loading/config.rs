use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{NetworkMeta, ProjectionParams};
use crate::Error;

/// On-disk format of a network snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkFormat {
    /// FeatureCollection of line features with segment properties
    GeoJson,
    /// Delimited table with a WKT `geom` column
    Csv,
}

impl NetworkFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "geojson" | "json" => Some(Self::GeoJson),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Polygon synthesis constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsochroneConfig {
    /// Buffer radius per cutoff minute for single-segment isochrones,
    /// in metric CRS units
    pub buffer_meters_per_minute: f64,
    /// Buffer around the two-segment convex hull, in degrees
    pub hull_buffer: f64,
    /// Area kept by the concave hull for three or more segments, as a
    /// ratio of the convex hull area in `(0, 1]`. `1.0` is the convex hull.
    pub concavity: f64,
}

impl Default for IsochroneConfig {
    fn default() -> Self {
        Self {
            buffer_meters_per_minute: 60.0,
            hull_buffer: 0.0003,
            concavity: 0.9,
        }
    }
}

/// Configuration for loading a road network snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub network_path: PathBuf,
    /// Inferred from the file extension when absent
    #[serde(default)]
    pub format: Option<NetworkFormat>,
    #[serde(default)]
    pub projection: ProjectionParams,
    #[serde(default = "default_max_snap_distance")]
    pub max_snap_distance: f64,
    #[serde(default)]
    pub isochrone: IsochroneConfig,
}

fn default_max_snap_distance() -> f64 {
    NetworkMeta::default().max_snap_distance
}

impl NetworkConfig {
    pub fn new(network_path: impl Into<PathBuf>) -> Self {
        Self {
            network_path: network_path.into(),
            format: None,
            projection: ProjectionParams::default(),
            max_snap_distance: default_max_snap_distance(),
            isochrone: IsochroneConfig::default(),
        }
    }

    pub fn format(&self) -> Result<NetworkFormat, Error> {
        self.format
            .or_else(|| NetworkFormat::from_path(&self.network_path))
            .ok_or_else(|| {
                Error::InvalidData(format!(
                    "Cannot infer network format from '{}', set it explicitly",
                    self.network_path.display()
                ))
            })
    }

    pub fn meta(&self) -> NetworkMeta {
        NetworkMeta {
            projection: self.projection,
            max_snap_distance: self.max_snap_distance,
            isochrone: self.isochrone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(
            NetworkConfig::new("data/rede.geojson").format().unwrap(),
            NetworkFormat::GeoJson
        );
        assert_eq!(
            NetworkConfig::new("data/REDE.CSV").format().unwrap(),
            NetworkFormat::Csv
        );
        assert!(NetworkConfig::new("data/rede.shp").format().is_err());

        let mut explicit = NetworkConfig::new("data/rede.txt");
        explicit.format = Some(NetworkFormat::Csv);
        assert_eq!(explicit.format().unwrap(), NetworkFormat::Csv);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let config: NetworkConfig =
            serde_json::from_str(r#"{"network_path": "rede.geojson", "isochrone": {"concavity": 0.5}}"#)
                .unwrap();
        assert_eq!(config.max_snap_distance, 2000.0);
        assert_eq!(config.projection, ProjectionParams::default());
        assert_eq!(config.isochrone.concavity, 0.5);
        assert_eq!(config.isochrone.buffer_meters_per_minute, 60.0);
        assert_eq!(config.meta().isochrone.hull_buffer, 0.0003);
    }
}
