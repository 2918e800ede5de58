use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::{info, warn};

use super::domain::{
    acceptance_summary, AcceptanceSummary, Application, ApplicationId, ApplicationStatus, JobId,
};
use super::policy::{self, AcceptAvailability};
use super::scheduling::{InterviewForm, ScheduleValidationErrors};
use super::views::{self, CompanyApplicationCard};
use crate::api::{AcceptApplicationResponse, ApiError, ApplicationsApi};

/// Transient notice shown after a successful accept.
pub const ACCEPT_SUCCESS_NOTICE: &str = "Interview scheduled! Candidate has been notified.";
pub const ACCEPT_NOTICE_TTL: Duration = Duration::from_secs(5);

const ACCEPT_FALLBACK_ERROR: &str = "Failed to schedule interview";

/// Blocking load failures for the review board, rendered as an error panel
/// with a navigation escape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardLoadError {
    #[error("You do not have permission to view these applications")]
    Forbidden,
    #[error("Job not found")]
    JobNotFound,
    #[error("Failed to load applications")]
    Unavailable,
}

impl From<ApiError> for BoardLoadError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Forbidden => Self::Forbidden,
            ApiError::NotFound => Self::JobNotFound,
            _ => Self::Unavailable,
        }
    }
}

/// Failure modes of the accept transition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AcceptError {
    #[error("a scheduling submission is already in flight")]
    SubmissionInFlight,
    #[error("application not found on this board")]
    UnknownApplication,
    #[error("only pending applications can be accepted")]
    NotPending,
    #[error("position already filled by {accepted_candidate}")]
    PositionFilled { accepted_candidate: String },
    #[error("interview details are invalid")]
    Validation(ScheduleValidationErrors),
    #[error("{message}")]
    Submit { message: String },
}

/// Failure modes of the reject transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectError {
    #[error("application not found on this board")]
    UnknownApplication,
    #[error("only pending applications can be rejected")]
    NotPending,
    #[error("{0}")]
    Submit(String),
}

/// Company-side review surface for one job's applications.
///
/// The acceptance aggregate is derived from the fetched collection and
/// rebuilt by a full refetch after every mutating action; it is never
/// patched incrementally, so the board cannot drift from the server's view
/// at the cost of one extra round trip.
pub struct ReviewBoard<A> {
    api: Arc<A>,
    job_id: JobId,
    applications: Vec<Application>,
    summary: AcceptanceSummary,
    submitting: bool,
    notice_deadline: Option<Instant>,
}

impl<A> ReviewBoard<A>
where
    A: ApplicationsApi,
{
    pub fn new(api: Arc<A>, job_id: JobId) -> Self {
        Self {
            api,
            job_id,
            applications: Vec::new(),
            summary: AcceptanceSummary::default(),
            submitting: false,
            notice_deadline: None,
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn summary(&self) -> &AcceptanceSummary {
        &self.summary
    }

    /// Whether a scheduling submission is outstanding; the whole scheduling
    /// form disables while this is set.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn success_notice(&self, now: Instant) -> Option<&'static str> {
        match self.notice_deadline {
            Some(deadline) if now < deadline => Some(ACCEPT_SUCCESS_NOTICE),
            _ => None,
        }
    }

    /// Board-level banner when the position has been filled.
    pub fn position_filled_banner(&self) -> Option<String> {
        if !self.summary.has_accepted_candidate {
            return None;
        }
        self.summary
            .accepted_candidate_name
            .as_ref()
            .map(|name| format!("Position Filled: Interview scheduled with {name}."))
    }

    /// Fetch the application list and rebuild the derived acceptance state
    /// from the returned collection. The wire-level candidate name only
    /// fills in when no accepted application embeds its candidate.
    pub async fn refresh(&mut self) -> Result<(), BoardLoadError> {
        let response = self
            .api
            .applications_for_job(&self.job_id)
            .await
            .map_err(BoardLoadError::from)?;

        let mut summary = acceptance_summary(&response.applications);
        if summary.has_accepted_candidate && summary.accepted_candidate_name.is_none() {
            summary.accepted_candidate_name = response.accepted_candidate_name;
        }

        self.applications = response.applications;
        self.summary = summary;
        Ok(())
    }

    /// Accept an application, scheduling its interview in the same
    /// transition.
    ///
    /// Gating order: submission flag, then acceptance policy, then the
    /// temporal validator. A server failure keeps the form open with a
    /// single top-level message; a success resets the form, arms the
    /// transient notice, and refetches the board.
    pub async fn accept(
        &mut self,
        application: &ApplicationId,
        form: &mut InterviewForm,
        today: NaiveDate,
        now: Instant,
    ) -> Result<AcceptApplicationResponse, AcceptError> {
        if self.submitting {
            return Err(AcceptError::SubmissionInFlight);
        }

        let target = self
            .find(application)
            .ok_or(AcceptError::UnknownApplication)?;
        if !target.status.is_pending() {
            return Err(AcceptError::NotPending);
        }
        if let AcceptAvailability::PositionFilled { accepted_candidate } =
            policy::accept_availability(target, &self.summary)
        {
            return Err(AcceptError::PositionFilled { accepted_candidate });
        }

        let payload = form.validate(today).map_err(AcceptError::Validation)?;

        self.submitting = true;
        let result = self.api.accept_application(application, payload).await;
        self.submitting = false;

        match result {
            Ok(confirmation) => {
                form.reset();
                self.notice_deadline = Some(now + ACCEPT_NOTICE_TTL);
                info!(
                    job = %self.job_id.0,
                    application = %application.0,
                    "application accepted, interview scheduled"
                );
                if let Err(err) = self.refresh().await {
                    warn!(job = %self.job_id.0, error = %err, "post-accept refresh failed");
                }
                Ok(confirmation)
            }
            Err(err) => {
                let message = match &err {
                    ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
                    _ => ACCEPT_FALLBACK_ERROR.to_string(),
                };
                form.submit_error = Some(message.clone());
                Err(AcceptError::Submit { message })
            }
        }
    }

    /// Reject a pending application. Allowed independent of the acceptance
    /// flag.
    pub async fn reject(&mut self, application: &ApplicationId) -> Result<(), RejectError> {
        let target = self
            .find(application)
            .ok_or(RejectError::UnknownApplication)?;
        if !policy::can_reject(&target.status) {
            return Err(RejectError::NotPending);
        }

        self.api
            .update_status(application, ApplicationStatus::Rejected)
            .await
            .map_err(|err| RejectError::Submit(err.to_string()))?;

        info!(job = %self.job_id.0, application = %application.0, "application rejected");
        if let Err(err) = self.refresh().await {
            warn!(job = %self.job_id.0, error = %err, "post-reject refresh failed");
        }
        Ok(())
    }

    /// Card projections for rendering, one per application.
    pub fn card_views(&self) -> Vec<CompanyApplicationCard> {
        self.applications
            .iter()
            .map(|application| views::company_card(application, &self.summary))
            .collect()
    }

    fn find(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications
            .iter()
            .find(|application| &application.id == id)
    }
}
