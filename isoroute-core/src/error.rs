use thiserror::Error;

use crate::{Mode, SegmentId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("No segment in the network allows {0} travel")]
    NoApplicableSegment(Mode),
    #[error("No {mode}-accessible road near point ({lon}, {lat})")]
    NoRoadNearPoint { mode: Mode, lon: f64, lat: f64 },
    #[error("No {0} route found between the snapped points")]
    NoRouteFound(Mode),
    #[error("Segment {segment} has invalid {mode} cost {value}")]
    InvalidModeCost {
        segment: SegmentId,
        mode: Mode,
        value: f64,
    },
    #[error("Invalid cutoff {0}: cutoffs must be positive minutes")]
    InvalidCutoff(u32),
    #[error("Unknown travel mode '{0}'")]
    InvalidMode(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
