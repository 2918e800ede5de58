use super::domain::{AcceptanceSummary, Application, ApplicationStatus};
use serde::Serialize;

/// Fixed tooltip shown on a disabled accept control.
pub const POSITION_FILLED_TOOLTIP: &str =
    "Position already filled. Only one candidate per job can be accepted.";

/// Fallback when the accepted candidate's name is not embedded in the
/// response.
const UNNAMED_CANDIDATE: &str = "another candidate";

/// Availability of the accept control for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AcceptAvailability {
    Open,
    PositionFilled { accepted_candidate: String },
}

impl AcceptAvailability {
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Human-readable reason shown next to a blocked accept control.
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Open => None,
            Self::PositionFilled { accepted_candidate } => Some(format!(
                "Position filled - interview scheduled with {accepted_candidate}"
            )),
        }
    }

    pub const fn tooltip(&self) -> Option<&'static str> {
        match self {
            Self::Open => None,
            Self::PositionFilled { .. } => Some(POSITION_FILLED_TOOLTIP),
        }
    }
}

/// An application may move to accepted only while pending and only while
/// its job has no accepted candidate yet.
///
/// This gate is a UX optimization; the server runs the authoritative check,
/// so concurrent accept attempts on two applications of the same job still
/// resolve to exactly one winner.
pub fn can_accept(status: &ApplicationStatus, summary: &AcceptanceSummary) -> bool {
    status.is_pending() && !summary.has_accepted_candidate
}

/// Reject is allowed for any pending application, independent of the
/// acceptance flag.
pub fn can_reject(status: &ApplicationStatus) -> bool {
    status.is_pending()
}

/// Resolve the accept-control state for one application against the job's
/// derived acceptance summary.
pub fn accept_availability(
    application: &Application,
    summary: &AcceptanceSummary,
) -> AcceptAvailability {
    if summary.has_accepted_candidate && !application.status.is_accepted() {
        AcceptAvailability::PositionFilled {
            accepted_candidate: summary
                .accepted_candidate_name
                .clone()
                .unwrap_or_else(|| UNNAMED_CANDIDATE.to_string()),
        }
    } else {
        AcceptAvailability::Open
    }
}
