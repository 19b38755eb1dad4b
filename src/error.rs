//! Error types and handling for the `WindSite` application

use thiserror::Error;

/// Main error type for the `WindSite` application
#[derive(Error, Debug)]
pub enum WindSiteError {
    /// The measurement source was unreachable or answered with an error
    #[error("Fetch failure: {message}")]
    FetchFailure { message: String },

    /// The measurement payload is missing required numeric fields or is out of range
    #[error("Invalid measurement: {message}")]
    InvalidMeasurement { message: String },

    /// Latitude or longitude could not be parsed or is out of range
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The export document template failed to render
    #[error("Render error: {source}")]
    Render {
        #[from]
        source: askama::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WindSiteError {
    /// Create a new fetch failure
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::FetchFailure {
            message: message.into(),
        }
    }

    /// Create a new invalid measurement error
    pub fn invalid_measurement<S: Into<String>>(message: S) -> Self {
        Self::InvalidMeasurement {
            message: message.into(),
        }
    }

    /// Create a new invalid coordinates error
    pub fn invalid_coordinates<S: Into<String>>(message: S) -> Self {
        Self::InvalidCoordinates {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WindSiteError::FetchFailure { .. } => {
                "Unable to retrieve site data. Please check your connection and try again."
                    .to_string()
            }
            WindSiteError::InvalidMeasurement { .. } => {
                "The site data received was incomplete. Please try another location.".to_string()
            }
            WindSiteError::InvalidCoordinates { message } => {
                format!("Invalid coordinates: {message}")
            }
            WindSiteError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WindSiteError::Render { .. } => {
                "The report could not be rendered. Please try again.".to_string()
            }
            WindSiteError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for WindSiteError {
    fn from(err: reqwest::Error) -> Self {
        WindSiteError::fetch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let fetch_err = WindSiteError::fetch("connection refused");
        assert!(matches!(fetch_err, WindSiteError::FetchFailure { .. }));

        let measurement_err = WindSiteError::invalid_measurement("wind speed missing");
        assert!(matches!(
            measurement_err,
            WindSiteError::InvalidMeasurement { .. }
        ));

        let coord_err = WindSiteError::invalid_coordinates("latitude out of range");
        assert!(matches!(coord_err, WindSiteError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_user_messages() {
        let fetch_err = WindSiteError::fetch("test");
        assert!(fetch_err.user_message().contains("Unable to retrieve"));

        let measurement_err = WindSiteError::invalid_measurement("test");
        assert!(measurement_err.user_message().contains("incomplete"));

        let coord_err = WindSiteError::invalid_coordinates("latitude 91");
        assert!(coord_err.user_message().contains("latitude 91"));
    }

    #[test]
    fn test_display_includes_detail() {
        let err = WindSiteError::invalid_measurement("wind speed is negative");
        assert_eq!(
            err.to_string(),
            "Invalid measurement: wind speed is negative"
        );
    }

    #[test]
    fn test_render_error_conversion() {
        let err: WindSiteError = askama::Error::Fmt(std::fmt::Error).into();
        assert!(matches!(err, WindSiteError::Render { .. }));
        assert!(err.user_message().contains("could not be rendered"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WindSiteError = io_err.into();
        assert!(matches!(err, WindSiteError::Io { .. }));
    }
}
