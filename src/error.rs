use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::protocol::ErrorResponse;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid data")]
    InvalidData,

    #[error("Expression not found: {0}")]
    NotFound(String),

    #[error("Malformed result report: {0}")]
    MalformedReport(String),

    #[error("Expression processor is no longer running")]
    ProcessorClosed,

    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Orchestrator returned status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CalcError {
    /// HTTP status reported to the client that triggered this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CalcError::InvalidData => StatusCode::UNPROCESSABLE_ENTITY,
            CalcError::NotFound(_) => StatusCode::NOT_FOUND,
            CalcError::MalformedReport(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_their_status() {
        assert_eq!(
            CalcError::InvalidData.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            CalcError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CalcError::MalformedReport("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn infrastructure_errors_are_server_errors() {
        assert_eq!(
            CalcError::ProcessorClosed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            CalcError::Config("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_display() {
        let err = CalcError::NotFound("t1".into());
        assert_eq!(err.to_string(), "Expression not found: t1");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CalcError>();
    }
}
