use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::workflows::applications::domain::{
    time_of_day, Application, ApplicationStatus, Interview, JobId,
};

/// Body of `POST /applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub job_id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

/// Response of `GET /applications/check/{jobId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCheck {
    pub has_applied: bool,
}

/// Response of `GET /applications/for-job/{jobId}`.
///
/// The acceptance flag and name also arrive on the wire, but consumers
/// recompute them from the collection; the wire fields only fill in the
/// candidate name when the embed is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationsResponse {
    pub applications: Vec<Application>,
    pub has_accepted_candidate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_candidate_name: Option<String>,
}

/// Body of `POST /applications/{id}/accept`.
///
/// Optional fields are omitted entirely when unset; the contract never
/// carries empty strings or nulls for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptApplicationRequest {
    pub interview_date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub interview_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Response of `POST /applications/{id}/accept`, the sole entry point that
/// both flips the status to accepted and creates the interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptApplicationResponse {
    pub message: String,
    pub application: Application,
    pub interview: Interview,
}

/// Body of the status-update call backing the reject path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// Structured error body used by the backend for failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
