//! Data models for the WindSite application
//!
//! - Location: site coordinates and the example location table
//! - Measurement: site measurements as received from a measurement source

pub mod location;
pub mod measurement;

pub use location::{Coordinates, ExampleLocation, default_example_locations};
pub use measurement::SiteMeasurement;
