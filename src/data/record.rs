//! District Record Module
//! Typed row model for the district equity dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Valid range for every score column.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

#[derive(Error, Debug)]
#[error("unrecognized zone: {0:?}")]
pub struct ParseZoneError(pub String);

/// Coarse geographic grouping used for regional rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    North,
    South,
    East,
    West,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::North, Zone::South, Zone::East, Zone::West];

    pub fn name(self) -> &'static str {
        match self {
            Zone::North => "North",
            Zone::South => "South",
            Zone::East => "East",
            Zone::West => "West",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Zone::North),
            "south" => Ok(Zone::South),
            "east" => Ok(Zone::East),
            "west" => Ok(Zone::West),
            _ => Err(ParseZoneError(s.to_string())),
        }
    }
}

/// The four score columns tracked per district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Dei,
    AccessHealth,
    UpdateLoad,
    Stability,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Dei,
        Metric::AccessHealth,
        Metric::UpdateLoad,
        Metric::Stability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Dei => "Digital Equity Index",
            Metric::AccessHealth => "Access Health Score",
            Metric::UpdateLoad => "Update Load Score",
            Metric::Stability => "Stability Score",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Metric::Dei => "DEI",
            Metric::AccessHealth => "Access",
            Metric::UpdateLoad => "Update Load",
            Metric::Stability => "Stability",
        }
    }

    /// Orientation of the scale. Update load and stability measure burden
    /// and volatility, so lower values are better there.
    pub fn higher_is_better(self) -> bool {
        matches!(self, Metric::Dei | Metric::AccessHealth)
    }
}

/// One row of the district equity dataset. Immutable after load;
/// `(state, district)` is a unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictRecord {
    pub state: String,
    pub district: String,
    pub zone: Zone,
    pub dei: f64,
    pub access_health: f64,
    pub update_load: f64,
    pub stability: f64,
}

impl DistrictRecord {
    pub fn score(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Dei => self.dei,
            Metric::AccessHealth => self.access_health,
            Metric::UpdateLoad => self.update_load,
            Metric::Stability => self.stability,
        }
    }
}
