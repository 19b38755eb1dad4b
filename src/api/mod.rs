//! JSON API
//!
//! All handlers work on the one shared session held in [`AppState`]; see
//! [`crate::web`] for the single-user model.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    WindSiteError,
    assessment::{AssessmentOutcome, AssessmentService},
    export,
    models::{Coordinates, ExampleLocation},
    presentation::ReportView,
};

/// Shared by every client of the server
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AssessmentService>,
    pub examples: Arc<Vec<ExampleLocation>>,
}

/// Latitude/longitude as typed into the form (text) or taken from an example (number)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DegreesInput {
    Number(f64),
    Text(String),
}

/// How the coordinates were picked in the frontend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputOrigin {
    #[default]
    Form,
    /// Clicked on the map, rounded to four decimal places
    Map,
}

#[derive(Debug, Deserialize)]
pub struct SiteRequest {
    pub latitude: DegreesInput,
    pub longitude: DegreesInput,
    #[serde(default)]
    pub origin: InputOrigin,
}

impl SiteRequest {
    fn coordinates(&self) -> crate::Result<Coordinates> {
        let coordinates = match (&self.latitude, &self.longitude) {
            (DegreesInput::Number(lat), DegreesInput::Number(lon)) => Coordinates::new(*lat, *lon),
            (lat, lon) => Coordinates::parse(&lat.as_text(), &lon.as_text()),
        }?;

        match self.origin {
            InputOrigin::Form => Ok(coordinates),
            InputOrigin::Map => {
                Coordinates::from_map_click(coordinates.latitude, coordinates.longitude)
            }
        }
    }
}

impl DegreesInput {
    fn as_text(&self) -> String {
        match self {
            DegreesInput::Number(n) => n.to_string(),
            DegreesInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

pub struct ApiError(WindSiteError);

impl From<WindSiteError> for ApiError {
    fn from(err: WindSiteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            WindSiteError::FetchFailure { .. } => (StatusCode::BAD_GATEWAY, "fetch_failure"),
            WindSiteError::InvalidMeasurement { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_measurement")
            }
            WindSiteError::InvalidCoordinates { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_coordinates")
            }
            WindSiteError::Config { .. }
            | WindSiteError::Render { .. }
            | WindSiteError::Io { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        tracing::debug!("Request failed with {}: {}", status, self.0);

        let body = ErrorBody {
            error,
            message: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/site-data", post(site_data))
        .route("/assessments", post(create_assessment))
        .route(
            "/assessments/current",
            get(current_assessment).delete(clear_assessment),
        )
        .route("/assessments/current/export", get(export_assessment))
        .route("/examples", get(get_examples))
        .with_state(state)
}

async fn site_data(
    State(state): State<AppState>,
    Json(request): Json<SiteRequest>,
) -> Result<Json<Value>, ApiError> {
    let coordinates = request.coordinates()?;
    let payload = state.service.fetch_raw(coordinates).await?;
    Ok(Json(payload))
}

async fn create_assessment(
    State(state): State<AppState>,
    Json(request): Json<SiteRequest>,
) -> Result<Response, ApiError> {
    match state.service.assess_input(request.coordinates()).await? {
        AssessmentOutcome::Current(report) => Ok(Json(ReportView::from(&report)).into_response()),
        AssessmentOutcome::Superseded { token } => Ok((
            StatusCode::CONFLICT,
            Json(json!({
                "error": "superseded",
                "message": "A newer assessment was requested; this response was discarded.",
                "token": token.sequence(),
            })),
        )
            .into_response()),
    }
}

async fn current_assessment(State(state): State<AppState>) -> Result<Json<ReportView>, StatusCode> {
    state
        .service
        .current_report()
        .map(|report| Json(ReportView::from(&report)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn clear_assessment(State(state): State<AppState>) -> StatusCode {
    state.service.clear();
    StatusCode::NO_CONTENT
}

async fn export_assessment(State(state): State<AppState>) -> Result<Response, ApiError> {
    let Some(report) = state.service.current_report() else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    let document = export::render_html(&report).map_err(WindSiteError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, export::EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::EXPORT_FILENAME),
            ),
        ],
        document,
    )
        .into_response())
}

async fn get_examples(State(state): State<AppState>) -> Json<Vec<ExampleLocation>> {
    Json(state.examples.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_with_numbers() {
        let request: SiteRequest =
            serde_json::from_str(r#"{"latitude": 35.1015, "longitude": -118.4012}"#).unwrap();
        let coords = request.coordinates().unwrap();
        assert_eq!(coords.latitude, 35.1015);
    }

    #[test]
    fn test_request_with_text() {
        let request: SiteRequest =
            serde_json::from_str(r#"{"latitude": "54.5194", "longitude": 9.9946}"#).unwrap();
        let coords = request.coordinates().unwrap();
        assert_eq!(coords.latitude, 54.5194);
        assert_eq!(coords.longitude, 9.9946);
    }

    #[test]
    fn test_map_click_request_is_rounded() {
        let request: SiteRequest = serde_json::from_str(
            r#"{"latitude": 46.8182349, "longitude": 8.2274561, "origin": "map"}"#,
        )
        .unwrap();
        assert_eq!(request.origin, InputOrigin::Map);
        let coords = request.coordinates().unwrap();
        assert_eq!(coords.latitude, 46.8182);
        assert_eq!(coords.longitude, 8.2275);
    }

    #[test]
    fn test_request_with_bad_text() {
        let request: SiteRequest =
            serde_json::from_str(r#"{"latitude": "north", "longitude": "0"}"#).unwrap();
        assert!(matches!(
            request.coordinates(),
            Err(WindSiteError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_error_status_codes() {
        let response = ApiError::from(WindSiteError::fetch("down")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ApiError::from(WindSiteError::invalid_measurement("x")).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
