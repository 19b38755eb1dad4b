//! Display decoration for assessment reports
//!
//! Star glyphs, score bar colors and the wind-rose chart dataset. The engine
//! types carry none of this, so they stay testable without display concerns.

use serde::Serialize;

use crate::assessment::{AssessmentReport, DirectionalProfile, Rating, SuitabilityScore};

pub const WIND_ROSE_TITLE: &str = "Wind Rose Chart";
pub const WIND_ROSE_CAPTION: &str = "The distribution of wind speed and direction (measured %) at a specific location over a defined period.";
pub const WIND_ROSE_INSUFFICIENT: &str = "Insufficient data for the wind rose.";
const WIND_ROSE_DATASET_LABEL: &str = "Wind frequency (%)";

/// Fill colors of the eight wind-rose sectors, N through NW
pub const SECTOR_COLORS: [&str; 8] = [
    "rgba(255, 99, 132, 0.6)",
    "rgba(54, 162, 235, 0.6)",
    "rgba(255, 206, 86, 0.6)",
    "rgba(75, 192, 192, 0.6)",
    "rgba(153, 102, 255, 0.6)",
    "rgba(255, 159, 64, 0.6)",
    "rgba(199, 199, 199, 0.6)",
    "rgba(100, 181, 246, 0.6)",
];

/// One star per rating step, Very Low gets a single star
#[must_use]
pub fn rating_stars(rating: Rating) -> String {
    "⭐".repeat(usize::from(rating.ordinal()) + 1)
}

/// Rating label prefixed with its stars, e.g. "⭐⭐⭐⭐ Good"
#[must_use]
pub fn decorated_rating(rating: Rating) -> String {
    format!("{} {}", rating_stars(rating), rating.label())
}

/// Color of the score progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBarColor {
    Green,
    Orange,
    Red,
}

impl ScoreBarColor {
    #[must_use]
    pub fn for_score(score: SuitabilityScore) -> Self {
        match score.value() {
            70.. => ScoreBarColor::Green,
            40..70 => ScoreBarColor::Orange,
            _ => ScoreBarColor::Red,
        }
    }

    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            ScoreBarColor::Green => "green",
            ScoreBarColor::Orange => "orange",
            ScoreBarColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBar {
    pub percent: u8,
    pub color: ScoreBarColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingView {
    pub label: &'static str,
    pub ordinal: u8,
    pub decorated: String,
}

/// One row of the rating legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBandView {
    pub label: &'static str,
    pub lower_bound: u8,
    pub decorated: String,
}

/// Rating bands from the best down, with the lowest score each one accepts
#[must_use]
pub fn rating_scale() -> Vec<RatingBandView> {
    Rating::ALL
        .iter()
        .rev()
        .map(|&rating| RatingBandView {
            label: rating.label(),
            lower_bound: rating.lower_bound(),
            decorated: decorated_rating(rating),
        })
        .collect()
}

/// Polar-area chart data for the wind rose, or the insufficient-data notice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WindRoseView {
    Chart {
        labels: Vec<&'static str>,
        dataset_label: &'static str,
        values: Vec<f64>,
        colors: Vec<&'static str>,
    },
    InsufficientData {
        message: &'static str,
    },
}

impl WindRoseView {
    #[must_use]
    pub fn from_profile(profile: &DirectionalProfile) -> Self {
        let sectors = profile.sectors();
        if sectors.is_empty() {
            return WindRoseView::InsufficientData {
                message: WIND_ROSE_INSUFFICIENT,
            };
        }

        WindRoseView::Chart {
            labels: sectors.iter().map(|s| s.sector.label()).collect(),
            dataset_label: WIND_ROSE_DATASET_LABEL,
            values: sectors.iter().map(|s| s.frequency).collect(),
            colors: SECTOR_COLORS.to_vec(),
        }
    }
}

/// Everything the report panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub latitude: f64,
    pub longitude: f64,
    pub wind_speed: f64,
    pub elevation: f64,
    pub score: u8,
    pub score_display: String,
    pub score_bar: ScoreBar,
    pub rating: RatingView,
    /// Sector with the highest frequency, when a profile is present
    pub prevailing_direction: Option<&'static str>,
    pub wind_rose: WindRoseView,
}

impl From<&AssessmentReport> for ReportView {
    fn from(report: &AssessmentReport) -> Self {
        Self {
            latitude: report.coordinates.latitude,
            longitude: report.coordinates.longitude,
            wind_speed: report.measurement.wind_speed,
            elevation: report.measurement.elevation,
            score: report.score.value(),
            score_display: report.score.to_string(),
            score_bar: ScoreBar {
                percent: report.score.value(),
                color: ScoreBarColor::for_score(report.score),
            },
            rating: RatingView {
                label: report.rating.label(),
                ordinal: report.rating.ordinal(),
                decorated: decorated_rating(report.rating),
            },
            prevailing_direction: report
                .directional_profile
                .prevailing_sector()
                .map(|sector| sector.label()),
            wind_rose: WindRoseView::from_profile(&report.directional_profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, SiteMeasurement};
    use rstest::rstest;

    #[rstest]
    #[case(Rating::Excellent, "⭐⭐⭐⭐⭐ Excellent")]
    #[case(Rating::Good, "⭐⭐⭐⭐ Good")]
    #[case(Rating::Fair, "⭐⭐⭐ Fair")]
    #[case(Rating::Poor, "⭐⭐ Poor")]
    #[case(Rating::VeryLow, "⭐ Very Low")]
    fn test_decorated_rating(#[case] rating: Rating, #[case] expected: &str) {
        assert_eq!(decorated_rating(rating), expected);
    }

    #[rstest]
    #[case(100, ScoreBarColor::Green)]
    #[case(70, ScoreBarColor::Green)]
    #[case(69, ScoreBarColor::Orange)]
    #[case(40, ScoreBarColor::Orange)]
    #[case(39, ScoreBarColor::Red)]
    #[case(0, ScoreBarColor::Red)]
    fn test_score_bar_color(#[case] value: u8, #[case] expected: ScoreBarColor) {
        assert_eq!(ScoreBarColor::for_score(SuitabilityScore::new(value)), expected);
    }

    #[test]
    fn test_wind_rose_absent() {
        let view = WindRoseView::from_profile(&DirectionalProfile::Absent);
        assert_eq!(
            view,
            WindRoseView::InsufficientData {
                message: WIND_ROSE_INSUFFICIENT
            }
        );
    }

    #[test]
    fn test_report_view() {
        let report = AssessmentReport::build(
            Coordinates::new(35.1015, -118.4012).unwrap(),
            SiteMeasurement {
                wind_speed: 8.0,
                elevation: 250.0,
                direction_frequencies: Some(vec![12.5, 10.0, 8.0, 5.5, 15.0, 20.0, 18.0, 11.0]),
            },
        );

        let view = ReportView::from(&report);
        assert_eq!(view.score, 71);
        assert_eq!(view.score_display, "71 / 100");
        assert_eq!(view.score_bar.color, ScoreBarColor::Green);
        assert_eq!(view.rating.decorated, "⭐⭐⭐⭐ Good");
        assert_eq!(view.prevailing_direction, Some("SW"));

        let WindRoseView::Chart { labels, values, colors, .. } = view.wind_rose else {
            panic!("expected chart data");
        };
        assert_eq!(labels, ["N", "NE", "E", "SE", "S", "SW", "W", "NW"]);
        assert_eq!(values[0], 12.5);
        assert_eq!(colors.len(), 8);
    }

    #[test]
    fn test_report_view_json_shape() {
        let report = AssessmentReport::build(
            Coordinates::new(0.0, 0.0).unwrap(),
            SiteMeasurement {
                wind_speed: 1.0,
                elevation: 0.0,
                direction_frequencies: None,
            },
        );
        let json = serde_json::to_value(ReportView::from(&report)).unwrap();
        assert_eq!(json["score_bar"]["color"], "red");
        assert_eq!(json["wind_rose"]["status"], "insufficient_data");
        assert_eq!(json["rating"]["label"], "Very Low");
        assert!(json["prevailing_direction"].is_null());
    }

    #[test]
    fn test_rating_scale_runs_best_first() {
        let scale = rating_scale();
        let bounds: Vec<u8> = scale.iter().map(|band| band.lower_bound).collect();
        assert_eq!(bounds, [80, 60, 40, 20, 0]);
        assert_eq!(scale[0].decorated, "⭐⭐⭐⭐⭐ Excellent");
        assert_eq!(scale[4].label, "Very Low");
    }
}
