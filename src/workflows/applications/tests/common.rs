use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::api::types::{
    AcceptApplicationRequest, AcceptApplicationResponse, ApplicationCheck,
    CreateApplicationRequest, JobApplicationsResponse,
};
use crate::api::{ApiError, ApplicationsApi};
use crate::workflows::applications::domain::{
    acceptance_summary, Application, ApplicationId, ApplicationStatus, CandidateSummary, Interview,
    JobId,
};

pub(super) fn job_id() -> JobId {
    JobId("job-42".to_string())
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
}

pub(super) fn applied_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn application(
    id: &str,
    status: ApplicationStatus,
    candidate_name: &str,
) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        job_id: job_id(),
        candidate_id: format!("cand-{id}"),
        cv_id: Some(format!("cv-{id}")),
        status,
        applied_at: applied_at(),
        cover_letter: None,
        interview: None,
        job: None,
        candidate: Some(CandidateSummary {
            id: format!("cand-{id}"),
            name: candidate_name.to_string(),
            description: None,
        }),
        cv: None,
    }
}

/// In-memory stand-in for the backend: one job's applications, the
/// one-accepted-candidate rule, and call recording.
#[derive(Default)]
pub(super) struct MemoryJobBoard {
    pub(super) applications: Mutex<Vec<Application>>,
    pub(super) has_applied: Mutex<bool>,
    pub(super) create_calls: Mutex<Vec<CreateApplicationRequest>>,
    pub(super) accept_calls: Mutex<Vec<(ApplicationId, AcceptApplicationRequest)>>,
    pub(super) update_calls: Mutex<Vec<(ApplicationId, ApplicationStatus)>>,
    pub(super) fail_next_create: Mutex<Option<ApiError>>,
    pub(super) fail_next_check: Mutex<Option<ApiError>>,
    pub(super) fail_next_for_job: Mutex<Option<ApiError>>,
    pub(super) fail_next_accept: Mutex<Option<ApiError>>,
}

impl MemoryJobBoard {
    pub(super) fn with_applications(applications: Vec<Application>) -> Self {
        let board = Self::default();
        *board.applications.lock().expect("fake mutex poisoned") = applications;
        board
    }

    pub(super) fn create_call_count(&self) -> usize {
        self.create_calls.lock().expect("fake mutex poisoned").len()
    }

    pub(super) fn accept_requests(&self) -> Vec<(ApplicationId, AcceptApplicationRequest)> {
        self.accept_calls
            .lock()
            .expect("fake mutex poisoned")
            .clone()
    }

    pub(super) fn update_requests(&self) -> Vec<(ApplicationId, ApplicationStatus)> {
        self.update_calls
            .lock()
            .expect("fake mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl ApplicationsApi for MemoryJobBoard {
    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> Result<Application, ApiError> {
        self.create_calls
            .lock()
            .expect("fake mutex poisoned")
            .push(request.clone());

        if let Some(err) = self
            .fail_next_create
            .lock()
            .expect("fake mutex poisoned")
            .take()
        {
            return Err(err);
        }

        *self.has_applied.lock().expect("fake mutex poisoned") = true;

        let mut guard = self.applications.lock().expect("fake mutex poisoned");
        let created = Application {
            id: ApplicationId(format!("app-{:02}", guard.len() + 1)),
            job_id: request.job_id.clone(),
            candidate_id: "cand-self".to_string(),
            cv_id: request.cv_id.clone(),
            status: ApplicationStatus::Pending,
            applied_at: applied_at(),
            cover_letter: request.cover_letter.clone(),
            interview: None,
            job: None,
            candidate: None,
            cv: None,
        };
        guard.push(created.clone());
        Ok(created)
    }

    async fn check_application(&self, _job: &JobId) -> Result<ApplicationCheck, ApiError> {
        if let Some(err) = self
            .fail_next_check
            .lock()
            .expect("fake mutex poisoned")
            .take()
        {
            return Err(err);
        }
        Ok(ApplicationCheck {
            has_applied: *self.has_applied.lock().expect("fake mutex poisoned"),
        })
    }

    async fn my_applications(&self) -> Result<Vec<Application>, ApiError> {
        Ok(self
            .applications
            .lock()
            .expect("fake mutex poisoned")
            .clone())
    }

    async fn applications_for_job(
        &self,
        _job: &JobId,
    ) -> Result<JobApplicationsResponse, ApiError> {
        if let Some(err) = self
            .fail_next_for_job
            .lock()
            .expect("fake mutex poisoned")
            .take()
        {
            return Err(err);
        }

        let applications = self
            .applications
            .lock()
            .expect("fake mutex poisoned")
            .clone();
        let summary = acceptance_summary(&applications);
        Ok(JobApplicationsResponse {
            applications,
            has_accepted_candidate: summary.has_accepted_candidate,
            accepted_candidate_name: summary.accepted_candidate_name,
        })
    }

    async fn accept_application(
        &self,
        application: &ApplicationId,
        request: AcceptApplicationRequest,
    ) -> Result<AcceptApplicationResponse, ApiError> {
        self.accept_calls
            .lock()
            .expect("fake mutex poisoned")
            .push((application.clone(), request.clone()));

        if let Some(err) = self
            .fail_next_accept
            .lock()
            .expect("fake mutex poisoned")
            .take()
        {
            return Err(err);
        }

        let mut guard = self.applications.lock().expect("fake mutex poisoned");
        if guard.iter().any(|entry| entry.status.is_accepted()) {
            return Err(ApiError::Conflict);
        }

        let target = guard
            .iter_mut()
            .find(|entry| &entry.id == application)
            .ok_or(ApiError::NotFound)?;
        target.status = ApplicationStatus::Accepted;

        let interview = Interview {
            id: format!("int-{}", application.0),
            application_id: application.clone(),
            interview_date: request.interview_date,
            interview_time: request.interview_time,
            location: request.location.clone(),
            notes: request.notes.clone(),
            created_at: applied_at(),
            updated_at: applied_at(),
        };
        target.interview = Some(interview.clone());

        Ok(AcceptApplicationResponse {
            message: "Application accepted and interview scheduled".to_string(),
            application: target.clone(),
            interview,
        })
    }

    async fn update_status(
        &self,
        application: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApiError> {
        self.update_calls
            .lock()
            .expect("fake mutex poisoned")
            .push((application.clone(), status.clone()));

        let mut guard = self.applications.lock().expect("fake mutex poisoned");
        let target = guard
            .iter_mut()
            .find(|entry| &entry.id == application)
            .ok_or(ApiError::NotFound)?;
        target.status = status;
        Ok(target.clone())
    }
}
