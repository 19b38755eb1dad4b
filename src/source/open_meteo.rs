//! Open-Meteo measurement source
//!
//! Wind speed comes from the first hourly value of the forecast endpoint and
//! elevation from the elevation endpoint. Open-Meteo has no directional
//! frequency data, so it is either simulated or left out.

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use rand::RngExt;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use super::MeasurementSource;
use crate::assessment::directional::SECTOR_COUNT;
use crate::config::SourceConfig;
use crate::models::Coordinates;
use crate::{Result, WindSiteError};

/// Range simulated sector frequencies are drawn from, in percent
const SIMULATED_FREQUENCY_RANGE: std::ops::Range<f64> = 5.0..20.0;

pub struct OpenMeteoSource {
    client: Client,
    base_url: String,
    simulate_directions: bool,
}

impl OpenMeteoSource {
    pub fn new(config: &SourceConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("WindSite/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            simulate_directions: config.simulate_directions,
        })
    }

    fn forecast_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly=wind_speed_10m&wind_speed_unit=ms",
            self.base_url, coordinates.latitude, coordinates.longitude
        )
    }

    fn elevation_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/elevation?latitude={}&longitude={}",
            self.base_url, coordinates.latitude, coordinates.longitude
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Open-Meteo request URL: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WindSiteError::fetch(format!(
                "Open-Meteo answered with status {status}"
            )));
        }
        Ok(response.json::<T>().await?)
    }

    async fn wind_speed(&self, coordinates: Coordinates) -> Result<Option<f64>> {
        let forecast: ForecastResponse = self.get_json(&self.forecast_url(coordinates)).await?;
        Ok(forecast.first_wind_speed())
    }

    async fn elevation(&self, coordinates: Coordinates) -> Result<Option<f64>> {
        let elevation: ElevationResponse =
            self.get_json(&self.elevation_url(coordinates)).await?;
        Ok(elevation.elevation.first().copied())
    }
}

#[async_trait]
impl MeasurementSource for OpenMeteoSource {
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    async fn fetch(&self, coordinates: Coordinates) -> Result<Value> {
        let start_time = Instant::now();

        let (wind_speed, elevation) =
            futures::try_join!(self.wind_speed(coordinates), self.elevation(coordinates))?;

        let direction_data = self.simulate_directions.then(simulated_direction_frequencies);

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved site measurements in {:.3}s",
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow Open-Meteo response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(json!({
            "wind_speed": wind_speed,
            "elevation": elevation,
            "directionData": direction_data,
        }))
    }
}

/// Eight sector frequencies drawn uniformly from 5% to 20%, two decimals
fn simulated_direction_frequencies() -> Vec<f64> {
    let mut rng = rand::rng();
    (0..SECTOR_COUNT)
        .map(|_| {
            let value: f64 = rng.random_range(SIMULATED_FREQUENCY_RANGE);
            (value * 100.0).round() / 100.0
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyData>,
}

#[derive(Debug, Deserialize)]
struct HourlyData {
    #[serde(rename = "wind_speed_10m")]
    wind_speed: Option<Vec<Option<f64>>>,
}

impl ForecastResponse {
    fn first_wind_speed(&self) -> Option<f64> {
        self.hourly
            .as_ref()
            .and_then(|hourly| hourly.wind_speed.as_ref())
            .and_then(|speeds| speeds.first().copied().flatten())
    }
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    #[serde(default)]
    elevation: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(simulate_directions: bool) -> OpenMeteoSource {
        OpenMeteoSource::new(&SourceConfig {
            base_url: "https://api.open-meteo.com/v1/".to_string(),
            timeout_seconds: 10,
            simulate_directions,
        })
        .unwrap()
    }

    #[test]
    fn test_urls() {
        let source = source(true);
        let coords = Coordinates::new(35.1015, -118.4012).unwrap();
        assert_eq!(
            source.forecast_url(coords),
            "https://api.open-meteo.com/v1/forecast?latitude=35.1015&longitude=-118.4012&hourly=wind_speed_10m&wind_speed_unit=ms"
        );
        assert_eq!(
            source.elevation_url(coords),
            "https://api.open-meteo.com/v1/elevation?latitude=35.1015&longitude=-118.4012"
        );
    }

    #[test]
    fn test_simulated_frequencies() {
        let values = simulated_direction_frequencies();
        assert_eq!(values.len(), SECTOR_COUNT);
        for value in values {
            assert!((5.0..=20.0).contains(&value));
            assert_eq!((value * 100.0).round() / 100.0, value);
        }
    }

    #[test]
    fn test_parse_forecast_response() {
        let body = r#"{
            "latitude": 35.1,
            "longitude": -118.4,
            "hourly": {
                "time": ["2026-10-18T00:00", "2026-10-18T01:00"],
                "wind_speed_10m": [6.4, 7.1]
            }
        }"#;
        let forecast: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(forecast.first_wind_speed(), Some(6.4));
    }

    #[test]
    fn test_parse_forecast_with_null_first_value() {
        let body = r#"{ "hourly": { "wind_speed_10m": [null, 7.1] } }"#;
        let forecast: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(forecast.first_wind_speed(), None);
    }

    #[test]
    fn test_parse_elevation_response() {
        let elevation: ElevationResponse =
            serde_json::from_str(r#"{ "elevation": [1213.0] }"#).unwrap();
        assert_eq!(elevation.elevation.first().copied(), Some(1213.0));
    }
}
