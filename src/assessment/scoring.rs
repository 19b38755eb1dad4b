//! Suitability scoring
//!
//! Wind speed carries 70% of the score and elevation 30%. Each contribution
//! saturates at its cap and never goes below zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wind speed (m/s) at which the wind contribution saturates
pub const WIND_SATURATION_MS: f64 = 10.0;
/// Elevation (m) at which the elevation contribution saturates
pub const ELEVATION_SATURATION_M: f64 = 500.0;
/// Maximum points contributed by wind speed
pub const WIND_WEIGHT: f64 = 70.0;
/// Maximum points contributed by elevation
pub const ELEVATION_WEIGHT: f64 = 30.0;

/// Composite suitability score in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuitabilityScore(u8);

impl SuitabilityScore {
    pub const MAX: u8 = 100;

    /// Wrap a raw value, clamping it into `0..=100`
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for SuitabilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.0, Self::MAX)
    }
}

/// Score a site from its wind speed and elevation.
///
/// `round(min(wind / 10, 1) * 70 + min(elevation / 500, 1) * 30)`, with both
/// contributions clamped to at least zero. Non-finite inputs contribute nothing.
#[must_use]
pub fn score(wind_speed: f64, elevation: f64) -> SuitabilityScore {
    let wind = contribution(wind_speed, WIND_SATURATION_MS, WIND_WEIGHT);
    let elev = contribution(elevation, ELEVATION_SATURATION_M, ELEVATION_WEIGHT);

    let total = (wind + elev).round().clamp(0.0, f64::from(SuitabilityScore::MAX));
    SuitabilityScore::new(total as u8)
}

fn contribution(value: f64, saturation: f64, weight: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value / saturation).clamp(0.0, 1.0) * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(8.0, 250.0, 71)]
    #[case(0.0, 0.0, 0)]
    #[case(12.0, 600.0, 100)]
    #[case(10.0, 500.0, 100)]
    #[case(5.0, 0.0, 35)]
    #[case(0.0, 500.0, 30)]
    #[case(10.0, 0.0, 70)]
    #[case(3.3, 120.0, 30)]
    fn test_reference_scores(#[case] wind: f64, #[case] elev: f64, #[case] expected: u8) {
        assert_eq!(score(wind, elev).value(), expected);
    }

    #[test]
    fn test_saturated_inputs_score_100() {
        for wind in [10.0, 10.5, 15.0, 40.0, 1e6] {
            for elev in [500.0, 501.0, 1500.0, 8848.0] {
                assert_eq!(score(wind, elev).value(), 100, "wind={wind} elev={elev}");
            }
        }
    }

    #[test]
    fn test_linear_region_matches_closed_form() {
        for wind_tenths in 0..=100 {
            for elev in (0..=500).step_by(25) {
                let wind = f64::from(wind_tenths) / 10.0;
                let elev = f64::from(elev);
                let raw = wind * 7.0 + elev * 0.06;
                // ties can land either side depending on float error
                if (raw.fract() - 0.5).abs() < 1e-9 {
                    continue;
                }
                let expected = raw.round() as u8;
                assert_eq!(score(wind, elev).value(), expected, "wind={wind} elev={elev}");
            }
        }
    }

    #[test]
    fn test_monotonic_in_each_input() {
        let mut previous = score(0.0, 250.0);
        for step in 1..=120 {
            let current = score(f64::from(step) * 0.1, 250.0);
            assert!(current >= previous);
            previous = current;
        }

        let mut previous = score(6.0, 0.0);
        for elev in (10..=700).step_by(10) {
            let current = score(6.0, f64::from(elev));
            assert!(current >= previous);
            previous = current;
        }
    }

    #[rstest]
    #[case(-1.0)]
    #[case(-28.0)]
    #[case(-430.0)]
    fn test_negative_elevation_contributes_zero(#[case] elevation: f64) {
        assert_eq!(score(8.0, elevation), score(8.0, 0.0));
        assert_eq!(score(0.0, elevation).value(), 0);
    }

    #[test]
    fn test_non_finite_inputs_do_not_panic() {
        assert_eq!(score(f64::NAN, 250.0).value(), 15);
        assert_eq!(score(5.0, f64::INFINITY).value(), 35);
    }

    #[test]
    fn test_score_display() {
        assert_eq!(score(8.0, 250.0).to_string(), "71 / 100");
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(SuitabilityScore::new(250).value(), 100);
    }
}
