use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::domain::JobId;
use crate::api::{ApiError, ApplicationsApi, CreateApplicationRequest};
use crate::auth::AuthContext;

/// Success-banner lifetime on the browse card.
pub const CARD_SUCCESS_BANNER: Duration = Duration::from_secs(3);
/// Success-banner lifetime on the job detail page.
pub const DETAIL_SUCCESS_BANNER: Duration = Duration::from_secs(5);

pub const ALREADY_APPLIED_MESSAGE: &str = "You have already applied to this job";
pub const CV_REQUIRED_MESSAGE: &str = "Please upload a CV before applying.";
pub const APPLY_FAILED_MESSAGE: &str = "Failed to submit application. Please try again.";

/// Lifecycle of a single apply attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplyAttempt {
    #[default]
    Idle,
    InFlight,
    Committed,
    RolledBack,
}

impl ApplyAttempt {
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::InFlight)
    }
}

/// Result of an apply action, reported to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The server accepted the submission; the optimistic state stands.
    Submitted,
    /// Guarded no-op: an attempt was in flight or the user already applied.
    Ignored,
    /// Sign-in required; no request was issued.
    LoginRequired { redirect: String },
    /// The server already holds an application for this job. Terminal and
    /// informational, not a failure.
    AlreadyApplied { message: &'static str },
    /// Missing-CV precondition; the caller should offer the upload flow
    /// with the original job as the return target.
    CvRequired {
        message: &'static str,
        upload_redirect: String,
    },
    /// Recoverable failure; state was rolled back and the action may be
    /// retried.
    Failed { message: &'static str },
}

/// Candidate-side apply coordinator for one job posting.
///
/// One in-flight submission per instance: the attempt state guards repeated
/// clicks, and `&mut self` makes overlapping calls on the same instance
/// unrepresentable. Races across separate instances or sessions are the
/// server's to resolve; the conflict branch exists for exactly that case.
pub struct ApplyFlow<A> {
    api: Arc<A>,
    job_id: JobId,
    success_banner: Duration,
    has_applied: bool,
    attempt: ApplyAttempt,
    banner_deadline: Option<Instant>,
}

impl<A> ApplyFlow<A>
where
    A: ApplicationsApi,
{
    pub fn new(api: Arc<A>, job_id: JobId, success_banner: Duration) -> Self {
        Self {
            api,
            job_id,
            success_banner,
            has_applied: false,
            attempt: ApplyAttempt::Idle,
            banner_deadline: None,
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn has_applied(&self) -> bool {
        self.has_applied
    }

    pub fn attempt(&self) -> ApplyAttempt {
        self.attempt
    }

    pub fn is_applying(&self) -> bool {
        self.attempt.is_in_flight()
    }

    /// The transient success indicator auto-clears once its deadline lapses.
    pub fn success_banner_visible(&self, now: Instant) -> bool {
        self.banner_deadline
            .map(|deadline| now < deadline)
            .unwrap_or(false)
    }

    /// Adopt the server's view of whether this user already applied.
    ///
    /// Failures are swallowed: the user can still try to apply, and the
    /// conflict branch covers a stale answer.
    pub async fn sync_with_server(&mut self) {
        match self.api.check_application(&self.job_id).await {
            Ok(check) => self.has_applied = check.has_applied,
            Err(err) => {
                warn!(job = %self.job_id.0, error = %err, "application preflight check failed");
            }
        }
    }

    /// Submit the application with optimistic local state.
    ///
    /// The optimistic flip happens before the request; every failure path
    /// restores `has_applied` to its pre-call value before branching on the
    /// error cause.
    pub async fn apply(&mut self, auth: &AuthContext, now: Instant) -> ApplyOutcome {
        if !auth.is_authenticated() {
            return ApplyOutcome::LoginRequired {
                redirect: login_redirect(&self.job_id),
            };
        }

        if self.attempt.is_in_flight() || self.has_applied {
            return ApplyOutcome::Ignored;
        }

        let prior = self.has_applied;
        self.has_applied = true;
        self.banner_deadline = Some(now + self.success_banner);
        self.attempt = ApplyAttempt::InFlight;

        let request = CreateApplicationRequest {
            job_id: self.job_id.clone(),
            cv_id: None,
            cover_letter: None,
        };

        match self.api.create_application(request).await {
            Ok(application) => {
                self.attempt = ApplyAttempt::Committed;
                info!(
                    job = %self.job_id.0,
                    application = %application.id.0,
                    "application submitted"
                );
                ApplyOutcome::Submitted
            }
            Err(err) => {
                self.has_applied = prior;
                self.banner_deadline = None;

                match err {
                    ApiError::Conflict => {
                        // Idempotent from the user's perspective: the
                        // application exists, so the attempt committed.
                        self.has_applied = true;
                        self.attempt = ApplyAttempt::Committed;
                        ApplyOutcome::AlreadyApplied {
                            message: ALREADY_APPLIED_MESSAGE,
                        }
                    }
                    ApiError::MissingCv => {
                        self.attempt = ApplyAttempt::RolledBack;
                        ApplyOutcome::CvRequired {
                            message: CV_REQUIRED_MESSAGE,
                            upload_redirect: cv_upload_redirect(&self.job_id),
                        }
                    }
                    other => {
                        self.attempt = ApplyAttempt::RolledBack;
                        warn!(job = %self.job_id.0, error = %other, "application submission failed");
                        ApplyOutcome::Failed {
                            message: APPLY_FAILED_MESSAGE,
                        }
                    }
                }
            }
        }
    }
}

/// Login path carrying the original job as the return target.
pub fn login_redirect(job: &JobId) -> String {
    format!("/login?redirect=/jobs/{}", job.0)
}

/// CV upload path carrying the original job as the return target.
pub fn cv_upload_redirect(job: &JobId) -> String {
    format!("/profile?tab=cv&redirect=/jobs/{}", job.0)
}
