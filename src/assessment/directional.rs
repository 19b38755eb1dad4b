//! Directional wind-frequency profile
//!
//! A profile is either complete (exactly eight sectors) or absent. Absence is
//! not an error: the rest of the report still renders without a wind rose.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of compass sectors in a profile
pub const SECTOR_COUNT: usize = 8;

/// Compass sectors in profile order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassSector {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassSector {
    pub const ALL: [CompassSector; SECTOR_COUNT] = [
        CompassSector::N,
        CompassSector::NE,
        CompassSector::E,
        CompassSector::SE,
        CompassSector::S,
        CompassSector::SW,
        CompassSector::W,
        CompassSector::NW,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompassSector::N => "N",
            CompassSector::NE => "NE",
            CompassSector::E => "E",
            CompassSector::SE => "SE",
            CompassSector::S => "S",
            CompassSector::SW => "SW",
            CompassSector::W => "W",
            CompassSector::NW => "NW",
        }
    }

    /// Center bearing of the sector in degrees from north
    #[must_use]
    pub fn bearing_degrees(self) -> f64 {
        f64::from(self as u8) * 45.0
    }
}

impl fmt::Display for CompassSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One sector of a present profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorFrequency {
    pub sector: CompassSector,
    /// Share of observations from this sector, in percent
    pub frequency: f64,
}

/// Validated directional profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DirectionalProfile {
    Present { frequencies: [f64; SECTOR_COUNT] },
    Absent,
}

impl DirectionalProfile {
    /// Validate a raw frequency sequence.
    ///
    /// Present only for exactly eight finite values. The sum is not checked.
    #[must_use]
    pub fn validate(raw: Option<&[f64]>) -> Self {
        let Some(values) = raw else {
            return DirectionalProfile::Absent;
        };

        match <[f64; SECTOR_COUNT]>::try_from(values) {
            Ok(frequencies) if frequencies.iter().all(|f| f.is_finite()) => {
                DirectionalProfile::Present { frequencies }
            }
            _ => DirectionalProfile::Absent,
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, DirectionalProfile::Present { .. })
    }

    /// Sector-tagged values, empty when absent
    #[must_use]
    pub fn sectors(&self) -> Vec<SectorFrequency> {
        match self {
            DirectionalProfile::Present { frequencies } => CompassSector::ALL
                .iter()
                .zip(frequencies.iter())
                .map(|(&sector, &frequency)| SectorFrequency { sector, frequency })
                .collect(),
            DirectionalProfile::Absent => Vec::new(),
        }
    }

    /// Sector with the highest frequency; the first one wins ties
    #[must_use]
    pub fn prevailing_sector(&self) -> Option<CompassSector> {
        self.sectors()
            .into_iter()
            .fold(None, |best: Option<SectorFrequency>, current| match best {
                Some(b) if b.frequency >= current.frequency => Some(b),
                _ => Some(current),
            })
            .map(|s| s.sector)
    }
}
