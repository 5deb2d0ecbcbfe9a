//! Top-level error type shared by the service binaries.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::profesia::ProfesiaImportError;

/// Errors that can escape to a binary's top level.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(std::io::Error),
    Import(ProfesiaImportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(source) => write!(f, "configuration error: {source}"),
            AppError::Telemetry(source) => write!(f, "telemetry error: {source}"),
            AppError::Io(source) => write!(f, "io error: {source}"),
            AppError::Server(source) => write!(f, "server error: {source}"),
            AppError::Import(source) => write!(f, "import error: {source}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(source) => Some(source),
            AppError::Telemetry(source) => Some(source),
            AppError::Io(source) => Some(source),
            AppError::Server(source) => Some(source),
            AppError::Import(source) => Some(source),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(source: ConfigError) -> Self {
        AppError::Config(source)
    }
}

impl From<TelemetryError> for AppError {
    fn from(source: TelemetryError) -> Self {
        AppError::Telemetry(source)
    }
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        AppError::Io(source)
    }
}

impl From<ProfesiaImportError> for AppError {
    fn from(source: ProfesiaImportError) -> Self {
        AppError::Import(source)
    }
}
