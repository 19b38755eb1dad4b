//! Assessment session
//!
//! Holds the single current report slot. Every request is tagged with a
//! monotonically increasing token when it starts; when it completes, only the
//! most recently issued token may touch the slot. Older completions are
//! discarded, so a slow response can never overwrite a newer one.

use serde::Serialize;
use tracing::{debug, info};

use super::report::AssessmentReport;
use crate::Result;

/// Tag identifying one assessment request within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// What happened to a completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The slot now holds the new report
    Applied,
    /// The request failed and the slot was cleared
    Cleared,
    /// A newer request was issued in the meantime; the slot was left alone
    Discarded,
}

#[derive(Debug, Default)]
pub struct AssessmentSession {
    latest_issued: u64,
    current: Option<AssessmentReport>,
}

impl AssessmentSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any request still in flight
    pub fn begin(&mut self) -> RequestToken {
        self.latest_issued += 1;
        debug!(token = self.latest_issued, "Assessment request issued");
        RequestToken(self.latest_issued)
    }

    #[must_use]
    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest_issued
    }

    /// Record the outcome of a request.
    ///
    /// A success replaces the current report, a failure clears it. Both only
    /// apply when `token` is the latest issued one.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: &Result<AssessmentReport>,
    ) -> Completion {
        if !self.is_latest(token) {
            info!(
                token = token.0,
                latest = self.latest_issued,
                "Discarding stale assessment response"
            );
            return Completion::Discarded;
        }

        match outcome {
            Ok(report) => {
                self.current = Some(report.clone());
                Completion::Applied
            }
            Err(e) => {
                debug!(token = token.0, "Clearing report after failed request: {}", e);
                self.current = None;
                Completion::Cleared
            }
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&AssessmentReport> {
        self.current.as_ref()
    }

    /// Drop the current report, e.g. when the user edits the coordinates
    pub fn clear(&mut self) {
        self.current = None;
    }
}
