//! Site assessment engine
//!
//! - Intake: validates raw measurement payloads
//! - Scoring: composite suitability score from wind speed and elevation
//! - Rating: score bands
//! - Directional: eight-sector wind frequency profile
//! - Report: the assembled, immutable assessment report
//! - Session and service: request ordering around the current report

pub mod directional;
pub mod intake;
pub mod rating;
pub mod report;
pub mod scoring;
pub mod service;
pub mod session;

pub use directional::{CompassSector, DirectionalProfile, SectorFrequency};
pub use intake::intake;
pub use rating::Rating;
pub use report::{AssessmentReport, assess};
pub use scoring::{SuitabilityScore, score};
pub use service::{AssessmentOutcome, AssessmentService};
pub use session::{AssessmentSession, Completion, RequestToken};
