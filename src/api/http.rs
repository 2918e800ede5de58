use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::types::{
    AcceptApplicationRequest, AcceptApplicationResponse, ApiErrorBody, ApplicationCheck,
    CreateApplicationRequest, JobApplicationsResponse, UpdateStatusRequest,
};
use super::{ApiError, ApplicationsApi};
use crate::config::ApiConfig;
use crate::workflows::applications::domain::{Application, ApplicationId, ApplicationStatus, JobId};

/// Backend error code signalling the missing-CV precondition.
const NO_CV_CODE: &str = "NO_CV";

/// reqwest-backed implementation of the applications contract.
pub struct HttpApplicationsApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApplicationsApi {
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, join(&self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T>(builder: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T>(response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|err| ApiError::Decode(err.to_string()))
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    async fn error_from(status: StatusCode, response: Response) -> ApiError {
        let body = response.json::<ApiErrorBody>().await.unwrap_or_default();

        if body.code.as_deref() == Some(NO_CV_CODE) {
            return ApiError::MissingCv;
        }

        match status {
            StatusCode::CONFLICT => ApiError::Conflict,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            _ => ApiError::Server {
                status: status.as_u16(),
                message: body
                    .message
                    .unwrap_or_else(|| "unexpected server failure".to_string()),
            },
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

#[async_trait]
impl ApplicationsApi for HttpApplicationsApi {
    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> Result<Application, ApiError> {
        Self::send(self.request(Method::POST, "/applications").json(&request)).await
    }

    async fn check_application(&self, job: &JobId) -> Result<ApplicationCheck, ApiError> {
        Self::send(self.request(Method::GET, &format!("/applications/check/{}", job.0))).await
    }

    async fn my_applications(&self) -> Result<Vec<Application>, ApiError> {
        Self::send(self.request(Method::GET, "/applications")).await
    }

    async fn applications_for_job(
        &self,
        job: &JobId,
    ) -> Result<JobApplicationsResponse, ApiError> {
        Self::send(self.request(Method::GET, &format!("/applications/for-job/{}", job.0))).await
    }

    async fn accept_application(
        &self,
        application: &ApplicationId,
        request: AcceptApplicationRequest,
    ) -> Result<AcceptApplicationResponse, ApiError> {
        Self::send(
            self.request(
                Method::POST,
                &format!("/applications/{}/accept", application.0),
            )
            .json(&request),
        )
        .await
    }

    async fn update_status(
        &self,
        application: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApiError> {
        Self::send(
            self.request(
                Method::PATCH,
                &format!("/applications/{}/status", application.0),
            )
            .json(&UpdateStatusRequest { status }),
        )
        .await
    }
}
