//! Site measurement model

use serde::{Deserialize, Serialize};

/// Measurements for one site, as validated by intake
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SiteMeasurement {
    /// Wind speed in m/s, never negative
    pub wind_speed: f64,
    /// Elevation in meters, negative below sea level
    pub elevation: f64,
    /// Per-sector wind frequency in percent, ordered N, NE, E, SE, S, SW, W, NW.
    /// `None` when the source supplied no usable directional data.
    pub direction_frequencies: Option<Vec<f64>>,
}

impl SiteMeasurement {
    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind_speed(&self) -> String {
        format!("{} m/s", self.wind_speed)
    }

    /// Format elevation with unit
    #[must_use]
    pub fn format_elevation(&self) -> String {
        format!("{} m", self.elevation)
    }
}
