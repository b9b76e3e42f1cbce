//! Relay error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Caller sent something we refuse to forward
    #[error("{0}")]
    Validation(String),

    /// Processor answered with a non-success status
    #[error("payment processor error: {status}")]
    Processor { status: u16, body: String },

    /// Processor answered 2xx but without the PIX data we need
    #[error("{0}")]
    ProcessorContract(String),

    /// Status lookup for an id the processor does not return
    #[error("transaction not found")]
    TransactionNotFound { status: u16, body: String },

    /// Timeout, DNS, refused connection, undecodable body
    #[error("internal error: {0}")]
    Transport(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Processor { status, .. }
            | RelayError::TransactionNotFound { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::ProcessorContract(_) | RelayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn upstream(&self) -> Option<(u16, &str)> {
        match self {
            RelayError::Processor { status, body }
            | RelayError::TransactionNotFound { status, body } => Some((*status, body.as_str())),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

/// Body returned to the storefront on any failure.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl From<&RelayError> for ErrorEnvelope {
    fn from(err: &RelayError) -> Self {
        let upstream = err.upstream();
        Self {
            error: true,
            message: err.to_string(),
            details: upstream.map(|(_, body)| body.to_string()),
            status_code: upstream.map(|(status, _)| status),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), "request failed: {}", self);
        }

        (status, Json(ErrorEnvelope::from(&self))).into_response()
    }
}
