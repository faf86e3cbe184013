//! Travel modes and their nominal properties

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Closed set of travel modes served by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Walk,
    Bike,
    Car,
}

/// Descriptive metadata for a mode
#[derive(Debug, Clone, Serialize)]
pub struct ModeInfo {
    pub name: &'static str,
    pub speed_kmh: f64,
    pub cost_field: &'static str,
    pub icon: &'static str,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Walk, Mode::Bike, Mode::Car];

    /// Nominal speed used to turn path length into travel time
    pub fn speed_kmh(self) -> f64 {
        match self {
            Mode::Walk => 5.0,
            Mode::Bike => 15.0,
            Mode::Car => 40.0,
        }
    }

    /// Travel time in minutes for `distance_km` at the nominal speed
    pub fn travel_minutes(self, distance_km: f64) -> f64 {
        if distance_km == 0.0 {
            return 0.0;
        }
        distance_km / self.speed_kmh() * 60.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Walk => "walk",
            Mode::Bike => "bike",
            Mode::Car => "car",
        }
    }

    pub fn info(self) -> ModeInfo {
        let (name, icon) = match self {
            Mode::Walk => ("Walking", "walk"),
            Mode::Bike => ("Cycling", "bicycle"),
            Mode::Car => ("Driving", "car"),
        };
        ModeInfo {
            name,
            speed_kmh: self.speed_kmh(),
            cost_field: self.cost_field(),
            icon,
        }
    }

    /// Column holding this mode's cost in the street table
    pub fn cost_field(self) -> &'static str {
        match self {
            Mode::Walk => "cost_walk",
            Mode::Bike => "cost_bike",
            Mode::Car => "cost",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" => Ok(Mode::Walk),
            "bike" => Ok(Mode::Bike),
            "car" => Ok(Mode::Car),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}
