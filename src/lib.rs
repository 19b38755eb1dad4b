//! `WindSite` - Wind energy site suitability assessment
//!
//! This library scores a site from its wind speed and elevation, classifies
//! the score into a rating, validates the directional wind-frequency profile
//! and assembles everything into a report for display and export.

pub mod api;
pub mod assessment;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod presentation;
pub mod source;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use assessment::{
    AssessmentOutcome, AssessmentReport, AssessmentService, DirectionalProfile, Rating,
    SuitabilityScore,
};
pub use config::WindSiteConfig;
pub use error::WindSiteError;
pub use models::{Coordinates, ExampleLocation, SiteMeasurement};
pub use source::{MeasurementSource, OpenMeteoSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WindSiteError>;
