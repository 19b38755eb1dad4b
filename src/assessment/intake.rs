//! Measurement intake
//!
//! Validates the raw payload handed over by a measurement source and turns it
//! into a [`SiteMeasurement`].

use serde_json::Value;
use tracing::debug;

use crate::models::SiteMeasurement;
use crate::{Result, WindSiteError};

const WIND_SPEED_KEYS: [&str; 2] = ["wind_speed", "windSpeed"];
const ELEVATION_KEYS: [&str; 1] = ["elevation"];
const DIRECTION_KEYS: [&str; 3] = ["directionData", "directionFrequencies", "direction_frequencies"];

/// Validate a raw measurement payload.
///
/// Fails with [`WindSiteError::InvalidMeasurement`] when wind speed or elevation
/// is missing or non-numeric, or when wind speed is negative. Elevation has no
/// bound. Directional data is carried through only if every entry is numeric;
/// its length is checked later by the directional validator.
pub fn intake(payload: &Value) -> Result<SiteMeasurement> {
    let wind_speed = required_number(payload, &WIND_SPEED_KEYS, "wind speed")?;
    if wind_speed < 0.0 {
        return Err(WindSiteError::invalid_measurement(format!(
            "wind speed {wind_speed} is negative"
        )));
    }

    let elevation = required_number(payload, &ELEVATION_KEYS, "elevation")?;
    let direction_frequencies = direction_frequencies(payload);

    Ok(SiteMeasurement {
        wind_speed,
        elevation,
        direction_frequencies,
    })
}

fn lookup<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| payload.get(key))
        .find(|value| !value.is_null())
}

fn required_number(payload: &Value, keys: &[&str], field: &str) -> Result<f64> {
    let value = lookup(payload, keys)
        .ok_or_else(|| WindSiteError::invalid_measurement(format!("{field} is missing")))?;

    value
        .as_f64()
        .filter(|number| number.is_finite())
        .ok_or_else(|| {
            WindSiteError::invalid_measurement(format!("{field} is not numeric: {value}"))
        })
}

fn direction_frequencies(payload: &Value) -> Option<Vec<f64>> {
    let entries = lookup(payload, &DIRECTION_KEYS)?.as_array()?;

    let frequencies: Option<Vec<f64>> = entries.iter().map(Value::as_f64).collect();
    if frequencies.is_none() {
        debug!("Dropping directional data with non-numeric entries");
    }
    frequencies
}
