//! Outbound boundary to the job-board backend.
//!
//! The backend is an external collaborator with a fixed HTTP contract; the
//! workflow modules depend only on the [`ApplicationsApi`] trait so they can
//! be exercised against in-memory fakes.

pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::workflows::applications::domain::{Application, ApplicationId, ApplicationStatus, JobId};

pub use http::HttpApplicationsApi;
pub use types::{
    AcceptApplicationRequest, AcceptApplicationResponse, ApplicationCheck,
    CreateApplicationRequest, JobApplicationsResponse, UpdateStatusRequest,
};

/// Error taxonomy for the backend boundary.
///
/// Validation failures never appear here; they are form state and are never
/// sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// 409: an application for this job already exists. Benign and terminal
    /// from the caller's perspective.
    #[error("an application for this job already exists")]
    Conflict,
    /// Precondition failure: the backend reported `NO_CV`.
    #[error("a CV must be uploaded before applying")]
    MissingCv,
    /// 403: terminal for the current view.
    #[error("permission denied")]
    Forbidden,
    /// 404: terminal for the current view.
    #[error("resource not found")]
    NotFound,
    /// Any other non-success response; recoverable, the caller may retry.
    #[error("server rejected the request ({status}): {message}")]
    Server { status: u16, message: String },
    /// Connection-level failure; recoverable, the caller may retry.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The response arrived but its payload did not match the contract.
    #[error("malformed response payload: {0}")]
    Decode(String),
}

/// The fixed application-lifecycle contract exposed by the backend.
#[async_trait]
pub trait ApplicationsApi: Send + Sync {
    /// `POST /applications`
    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> Result<Application, ApiError>;

    /// `GET /applications/check/{jobId}`
    async fn check_application(&self, job: &JobId) -> Result<ApplicationCheck, ApiError>;

    /// `GET /applications` (current user's applications)
    async fn my_applications(&self) -> Result<Vec<Application>, ApiError>;

    /// `GET /applications/for-job/{jobId}` (company view)
    async fn applications_for_job(&self, job: &JobId)
        -> Result<JobApplicationsResponse, ApiError>;

    /// `POST /applications/{id}/accept` - flips the status to accepted and
    /// creates the interview in one transition.
    async fn accept_application(
        &self,
        application: &ApplicationId,
        request: AcceptApplicationRequest,
    ) -> Result<AcceptApplicationResponse, ApiError>;

    /// `PATCH /applications/{id}/status` - backs the reject path.
    async fn update_status(
        &self,
        application: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApiError>;
}
