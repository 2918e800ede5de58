use std::fmt;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::applications::board::{AcceptError, BoardLoadError, RejectError};

/// Binary-level error aggregation for the CLI entry point.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Api(ApiError),
    Board(BoardLoadError),
    Accept(AcceptError),
    Reject(RejectError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Api(err) => write!(f, "api error: {err}"),
            AppError::Board(err) => write!(f, "{err}"),
            AppError::Accept(err) => write!(f, "accept failed: {err}"),
            AppError::Reject(err) => write!(f, "reject failed: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Api(err) => Some(err),
            AppError::Board(err) => Some(err),
            AppError::Accept(err) => Some(err),
            AppError::Reject(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ApiError> for AppError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<BoardLoadError> for AppError {
    fn from(value: BoardLoadError) -> Self {
        Self::Board(value)
    }
}

impl From<AcceptError> for AppError {
    fn from(value: AcceptError) -> Self {
        Self::Accept(value)
    }
}

impl From<RejectError> for AppError {
    fn from(value: RejectError) -> Self {
        Self::Reject(value)
    }
}
