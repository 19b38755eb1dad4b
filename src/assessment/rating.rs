//! Rating classification
//!
//! Maps a suitability score onto one of five bands. Display decoration lives
//! in [`crate::presentation`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::scoring::SuitabilityScore;

/// Discrete site rating, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    VeryLow,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Rating {
    /// All ratings from lowest to highest
    pub const ALL: [Rating; 5] = [
        Rating::VeryLow,
        Rating::Poor,
        Rating::Fair,
        Rating::Good,
        Rating::Excellent,
    ];

    /// Classify a score. Bands are checked from the highest lower bound down.
    #[must_use]
    pub fn classify(score: SuitabilityScore) -> Self {
        Self::from_value(score.value())
    }

    /// Classify a raw score value; values above 100 fall into the top band
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            80.. => Rating::Excellent,
            60..80 => Rating::Good,
            40..60 => Rating::Fair,
            20..40 => Rating::Poor,
            _ => Rating::VeryLow,
        }
    }

    /// Position in the ordering, `0` for Very Low up to `4` for Excellent
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Lowest score that falls into this band
    #[must_use]
    pub fn lower_bound(self) -> u8 {
        match self {
            Rating::Excellent => 80,
            Rating::Good => 60,
            Rating::Fair => 40,
            Rating::Poor => 20,
            Rating::VeryLow => 0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
            Rating::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
