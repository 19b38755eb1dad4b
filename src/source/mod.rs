//! Measurement sources
//!
//! A source turns coordinates into a raw measurement payload of the shape
//! `{"wind_speed": .., "elevation": .., "directionData": [..]}`. Validation of
//! that payload is left to [`crate::assessment::intake`].

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::models::Coordinates;

pub mod open_meteo;

pub use open_meteo::OpenMeteoSource;

#[async_trait]
pub trait MeasurementSource: Send + Sync {
    /// Fetch the raw measurement payload for a site.
    ///
    /// Fails with [`crate::WindSiteError::FetchFailure`] when the upstream
    /// service cannot be reached or answers with an error. No retries.
    async fn fetch(&self, coordinates: Coordinates) -> Result<Value>;
}
