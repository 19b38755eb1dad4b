//! Geographic coordinates and the example location table

use serde::{Deserialize, Serialize};

use crate::{Result, WindSiteError};

/// Decimal places kept when a location is picked by clicking the map
pub const MAP_CLICK_PRECISION: u32 = 4;

/// Site coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create validated coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(WindSiteError::invalid_coordinates(format!(
                "latitude {latitude} must be between -90 and 90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(WindSiteError::invalid_coordinates(format!(
                "longitude {longitude} must be between -180 and 180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse coordinates typed into the latitude/longitude text fields
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self> {
        let lat = parse_degrees(latitude, "latitude")?;
        let lon = parse_degrees(longitude, "longitude")?;
        Self::new(lat, lon)
    }

    /// Coordinates captured from a map click, rounded like the input fields show them
    pub fn from_map_click(latitude: f64, longitude: f64) -> Result<Self> {
        let (lat, lon) = Self {
            latitude,
            longitude,
        }
        .rounded_coordinates(MAP_CLICK_PRECISION);
        Self::new(lat, lon)
    }

    /// Round coordinates to the given number of decimal places
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// Format coordinates as a display string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

fn parse_degrees(input: &str, field: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WindSiteError::invalid_coordinates(format!(
            "{field} cannot be empty"
        )));
    }
    trimmed.parse::<f64>().map_err(|_| {
        WindSiteError::invalid_coordinates(format!("{field} '{trimmed}' is not a number"))
    })
}

/// A named site offered for pre-filling an assessment request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExampleLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ExampleLocation {
    #[must_use]
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }

    /// Coordinates to pre-fill the request with
    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Well known wind sites shipped as the default example table
#[must_use]
pub fn default_example_locations() -> Vec<ExampleLocation> {
    vec![
        ExampleLocation::new("Tehachapi, California (USA)", 35.1015, -118.4012),
        ExampleLocation::new("Schleswig-Holstein (Germany)", 54.5194, 9.9946),
        ExampleLocation::new("Sierra de los Caracoles (Uruguay)", -34.4746, -54.9379),
        ExampleLocation::new("Zaragoza (Spain)", 41.6488, -0.8891),
        ExampleLocation::new("Whitelee Wind Farm (Scotland)", 55.7148, -4.2764),
        ExampleLocation::new("Nevada Desert (USA)", 36.1699, -115.1398),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_trims_input() {
        let coords = Coordinates::parse(" 35.1015 ", "-118.4012").unwrap();
        assert_eq!(coords.latitude, 35.1015);
        assert_eq!(coords.longitude, -118.4012);
    }

    #[rstest]
    #[case("", "10")]
    #[case("abc", "10")]
    #[case("10", "east")]
    #[case("91", "0")]
    #[case("0", "-180.5")]
    #[case("NaN", "0")]
    fn test_parse_rejects_bad_input(#[case] lat: &str, #[case] lon: &str) {
        let result = Coordinates::parse(lat, lon);
        assert!(matches!(
            result,
            Err(WindSiteError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_map_click_rounds_to_four_places() {
        let coords = Coordinates::from_map_click(46.818_234_9, 8.227_456_1).unwrap();
        assert_eq!(coords.latitude, 46.8182);
        assert_eq!(coords.longitude, 8.2275);
    }

    #[test]
    fn test_format_coordinates() {
        let coords = Coordinates::new(54.5194, 9.9946).unwrap();
        assert_eq!(coords.format_coordinates(), "54.5194, 9.9946");
    }

    #[test]
    fn test_default_examples_are_valid() {
        let examples = default_example_locations();
        assert_eq!(examples.len(), 6);
        for example in &examples {
            assert!(example.coordinates().is_ok(), "{} is invalid", example.name);
        }
    }
}
