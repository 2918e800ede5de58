use std::time::Instant;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::apply::ApplyFlow;
use super::domain::{
    time_of_day, AcceptanceSummary, Application, ApplicationId, ApplicationStatus, Interview,
};
use super::policy;
use crate::api::ApplicationsApi;
use crate::auth::{AuthContext, UserRole};

pub const JOB_REMOVED_TITLE: &str = "[Job Removed]";
pub const JOB_CLOSED_NOTE: &str = "Job posting closed";
pub const PENDING_NOTE: &str = "Waiting for company response...";
pub const APPLY_SUCCESS_BANNER: &str = "✓ Application submitted!";

const MISSING_DESCRIPTION: &str = "No profile description available";
const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Status badge: canonical label plus a style key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub class: &'static str,
}

impl StatusBadge {
    pub fn for_status(status: &ApplicationStatus) -> Self {
        Self {
            label: status.label().to_string(),
            class: status.display_class(),
        }
    }
}

/// Interview details rendered on an accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetails {
    pub interview_date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub interview_time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&Interview> for InterviewDetails {
    fn from(interview: &Interview) -> Self {
        Self {
            interview_date: interview.interview_date,
            interview_time: interview.interview_time,
            location: interview.location.clone(),
            notes: interview.notes.clone(),
        }
    }
}

/// Candidate-side card for one of the user's own applications.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateApplicationCard {
    pub job_title: String,
    pub company_name: Option<String>,
    pub job_available: bool,
    pub applied_at: DateTime<Utc>,
    pub badge: StatusBadge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview: Option<InterviewDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_note: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_note: Option<&'static str>,
}

pub fn candidate_card(application: &Application) -> CandidateApplicationCard {
    let job_available = application.job.is_some();

    CandidateApplicationCard {
        job_title: application
            .job
            .as_ref()
            .map(|job| job.title.clone())
            .unwrap_or_else(|| JOB_REMOVED_TITLE.to_string()),
        company_name: application
            .job
            .as_ref()
            .map(|job| job.company.company_name.clone()),
        job_available,
        applied_at: application.applied_at,
        badge: StatusBadge::for_status(&application.status),
        // Interview details render only for accepted applications that
        // actually embed one.
        interview: if application.status.is_accepted() {
            application.interview.as_ref().map(InterviewDetails::from)
        } else {
            None
        },
        pending_note: application.status.is_pending().then_some(PENDING_NOTE),
        closed_note: (!job_available).then_some(JOB_CLOSED_NOTE),
    }
}

/// Company-side card for one application on the review board.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyApplicationCard {
    pub application_id: ApplicationId,
    pub candidate_name: String,
    pub description_preview: String,
    pub badge: StatusBadge,
    pub applied_at: DateTime<Utc>,
    pub has_cover_letter: bool,
    /// Accept/Reject controls render only while the application is pending.
    pub decision_controls_visible: bool,
    pub accept_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_filled_notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_tooltip: Option<&'static str>,
}

pub fn company_card(
    application: &Application,
    summary: &AcceptanceSummary,
) -> CompanyApplicationCard {
    let availability = policy::accept_availability(application, summary);
    let is_pending = application.status.is_pending();

    CompanyApplicationCard {
        application_id: application.id.clone(),
        candidate_name: application
            .candidate
            .as_ref()
            .map(|candidate| candidate.name.clone())
            .unwrap_or_default(),
        description_preview: description_preview(
            application
                .candidate
                .as_ref()
                .and_then(|candidate| candidate.description.as_deref()),
        ),
        badge: StatusBadge::for_status(&application.status),
        applied_at: application.applied_at,
        has_cover_letter: application.cover_letter.is_some(),
        decision_controls_visible: is_pending,
        accept_enabled: policy::can_accept(&application.status, summary),
        position_filled_notice: if is_pending {
            availability.notice()
        } else {
            None
        },
        accept_tooltip: if is_pending {
            availability.tooltip()
        } else {
            None
        },
    }
}

/// Apply-control presentation for a job card or detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyControl {
    /// Companies never see the apply control.
    pub visible: bool,
    pub enabled: bool,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_banner: Option<&'static str>,
}

pub fn apply_control<A>(flow: &ApplyFlow<A>, auth: &AuthContext, now: Instant) -> ApplyControl
where
    A: ApplicationsApi,
{
    let visible = auth
        .current_user()
        .map(|user| user.role != UserRole::Company)
        .unwrap_or(true);

    let label = if flow.has_applied() {
        "APPLIED ✓"
    } else if flow.is_applying() {
        "Applying..."
    } else if auth.is_authenticated() {
        "Apply Now"
    } else {
        "Login to Apply"
    };

    ApplyControl {
        visible,
        enabled: visible && !flow.is_applying() && !flow.has_applied(),
        label,
        success_banner: flow
            .success_banner_visible(now)
            .then_some(APPLY_SUCCESS_BANNER),
    }
}

fn description_preview(description: Option<&str>) -> String {
    match description {
        None => MISSING_DESCRIPTION.to_string(),
        Some(text) if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS => text.to_string(),
        Some(text) => {
            let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{cut}...")
        }
    }
}
