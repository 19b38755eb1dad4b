//! Assessment report model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::directional::DirectionalProfile;
use super::intake::intake;
use super::rating::Rating;
use super::scoring::{SuitabilityScore, score};
use crate::Result;
use crate::models::{Coordinates, SiteMeasurement};

/// Everything known about one assessed site. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub coordinates: Coordinates,
    pub measurement: SiteMeasurement,
    pub score: SuitabilityScore,
    pub rating: Rating,
    pub directional_profile: DirectionalProfile,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentReport {
    /// Build a report from an already validated measurement
    #[must_use]
    pub fn build(coordinates: Coordinates, measurement: SiteMeasurement) -> Self {
        let score = score(measurement.wind_speed, measurement.elevation);
        let directional_profile =
            DirectionalProfile::validate(measurement.direction_frequencies.as_deref());
        let rating = Rating::classify(score);

        debug!(
            score = score.value(),
            rating = rating.label(),
            directional = directional_profile.is_present(),
            "Built assessment report for {}",
            coordinates.format_coordinates()
        );

        Self {
            coordinates,
            measurement,
            score,
            rating,
            directional_profile,
            assessed_at: Utc::now(),
        }
    }
}

/// Validate a raw payload and build the report for it.
///
/// Either a complete report or the intake error; never a partial report.
pub fn assess(coordinates: Coordinates, payload: &Value) -> Result<AssessmentReport> {
    let measurement = intake(payload)?;
    Ok(AssessmentReport::build(coordinates, measurement))
}
