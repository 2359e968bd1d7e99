use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned to the caller for every failed analysis, whatever the cause.
pub const ANALYSIS_FAILURE_MESSAGE: &str = "Error during analysis.";

/// External services the analysis pipeline talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    GitHub,
    Model,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::GitHub => f.write_str("GitHub"),
            Upstream::Model => f.write_str("model service"),
        }
    }
}

/// Classified failure of one analysis request. Every stage returns this type;
/// none of them is recoverable within the request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("resume could not be read: {0}")]
    FileParse(String),

    #[error("{upstream} unreachable: {message}")]
    UpstreamTransport { upstream: Upstream, message: String },

    #[error("{upstream} API error{}: {message}", status_suffix(.status))]
    UpstreamApi {
        upstream: Upstream,
        /// `None` when the status was fine but the response envelope was malformed.
        status: Option<u16>,
        message: String,
    },

    #[error("model reply did not contain a JSON object")]
    Extraction,

    #[error("model returned an invalid analysis: {0}")]
    SchemaValidation(String),
}

impl AnalysisError {
    /// Stable classification label for operator-facing logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::FileParse(_) => "file_parse",
            AnalysisError::UpstreamTransport { .. } => "upstream_transport",
            AnalysisError::UpstreamApi { .. } => "upstream_api",
            AnalysisError::Extraction => "extraction",
            AnalysisError::SchemaValidation(_) => "schema_validation",
        }
    }

    /// Maps a reqwest failure that happened before a status was available.
    /// Timeouts land here as well.
    pub(crate) fn transport(upstream: Upstream, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        AnalysisError::UpstreamTransport { upstream, message }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Analysis(e) => {
                tracing::error!(kind = e.kind(), "Analysis failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ANALYSIS_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
