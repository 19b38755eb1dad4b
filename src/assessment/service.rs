//! Assessment service
//!
//! Runs one assessment request end to end: issue a token, fetch the raw
//! measurement, build the report and hand the outcome to the session. The
//! session lock is never held while the fetch is pending.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, instrument, warn};

use super::report::{AssessmentReport, assess};
use super::session::{AssessmentSession, Completion, RequestToken};
use crate::Result;
use crate::models::Coordinates;
use crate::source::MeasurementSource;

/// Result of a request that ran to completion
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentOutcome {
    /// The report is now the session's current report
    Current(AssessmentReport),
    /// A newer request was issued while this one was in flight
    Superseded { token: RequestToken },
}

pub struct AssessmentService {
    source: Arc<dyn MeasurementSource>,
    session: Mutex<AssessmentSession>,
}

impl AssessmentService {
    pub fn new(source: Arc<dyn MeasurementSource>) -> Self {
        Self {
            source,
            session: Mutex::new(AssessmentSession::new()),
        }
    }

    fn session(&self) -> MutexGuard<'_, AssessmentSession> {
        // the session holds plain data, a panic elsewhere cannot leave it half-updated
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Assess a site and update the current report.
    ///
    /// Errors from the latest request clear the current report and are
    /// returned. Any outcome of a superseded request is dropped.
    pub async fn assess(&self, coordinates: Coordinates) -> Result<AssessmentOutcome> {
        self.assess_input(Ok(coordinates)).await
    }

    /// Assess coordinates as they arrived from user input.
    ///
    /// Invalid coordinates still count as a request: they supersede anything
    /// in flight and clear the current report.
    #[instrument(skip_all)]
    pub async fn assess_input(
        &self,
        coordinates: Result<Coordinates>,
    ) -> Result<AssessmentOutcome> {
        let token = self.session().begin();

        let outcome = match coordinates {
            Ok(coordinates) => {
                debug!(
                    lat = coordinates.latitude,
                    lon = coordinates.longitude,
                    sequence = token.sequence(),
                    "Fetching site measurement"
                );
                match self.source.fetch(coordinates).await {
                    Ok(payload) => assess(coordinates, &payload),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        };

        let completion = self.session().complete(token, &outcome);

        match (completion, outcome) {
            (Completion::Discarded, _) => Ok(AssessmentOutcome::Superseded { token }),
            (_, Ok(report)) => {
                info!(
                    score = report.score.value(),
                    rating = report.rating.label(),
                    "Assessment completed"
                );
                Ok(AssessmentOutcome::Current(report))
            }
            (_, Err(e)) => {
                warn!("Assessment failed: {}", e);
                Err(e)
            }
        }
    }

    /// Fetch the raw payload without touching the session
    pub async fn fetch_raw(&self, coordinates: Coordinates) -> Result<serde_json::Value> {
        self.source.fetch(coordinates).await
    }

    /// Snapshot of the current report, if any
    #[must_use]
    pub fn current_report(&self) -> Option<AssessmentReport> {
        self.session().current().cloned()
    }

    pub fn clear(&self) {
        self.session().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindSiteError;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct StaticSource(Value);

    #[async_trait]
    impl MeasurementSource for StaticSource {
        async fn fetch(&self, _coordinates: Coordinates) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl MeasurementSource for FailingSource {
        async fn fetch(&self, _coordinates: Coordinates) -> Result<Value> {
            Err(WindSiteError::fetch("unreachable"))
        }
    }

    fn coords() -> Coordinates {
        Coordinates::new(54.5194, 9.9946).unwrap()
    }

    #[tokio::test]
    async fn test_successful_assessment_becomes_current() {
        let service = AssessmentService::new(Arc::new(StaticSource(
            json!({ "wind_speed": 8.0, "elevation": 250.0 }),
        )));

        let outcome = service.assess(coords()).await.unwrap();
        let AssessmentOutcome::Current(report) = outcome else {
            panic!("expected a current report");
        };
        assert_eq!(report.score.value(), 71);
        assert_eq!(service.current_report(), Some(report));
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_no_report() {
        let service = AssessmentService::new(Arc::new(FailingSource));
        let result = service.assess(coords()).await;
        assert!(matches!(result, Err(WindSiteError::FetchFailure { .. })));
        assert!(service.current_report().is_none());
    }

    #[tokio::test]
    async fn test_invalid_measurement_yields_no_report() {
        let service = AssessmentService::new(Arc::new(StaticSource(
            json!({ "wind_speed": "n/a", "elevation": 250.0 }),
        )));
        let result = service.assess(coords()).await;
        assert!(matches!(
            result,
            Err(WindSiteError::InvalidMeasurement { .. })
        ));
        assert!(service.current_report().is_none());
    }

    #[tokio::test]
    async fn test_invalid_coordinates_clear_previous_report() {
        let service = AssessmentService::new(Arc::new(StaticSource(
            json!({ "wind_speed": 8.0, "elevation": 250.0 }),
        )));
        service.assess(coords()).await.unwrap();
        assert!(service.current_report().is_some());

        let result = service
            .assess_input(Coordinates::parse("95", "10"))
            .await;
        assert!(matches!(
            result,
            Err(WindSiteError::InvalidCoordinates { .. })
        ));
        assert!(service.current_report().is_none());
    }

    #[tokio::test]
    async fn test_clear_drops_report() {
        let service = AssessmentService::new(Arc::new(StaticSource(
            json!({ "wind_speed": 3.0, "elevation": 20.0 }),
        )));
        service.assess(coords()).await.unwrap();
        service.clear();
        assert!(service.current_report().is_none());
    }
}
