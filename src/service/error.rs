//! Request-level failures of the summarization service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::summary::SummaryResponse;

/// Rejections of `POST /summarize`, answered as a failure body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("No data provided")]
    NoData,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Query is required")]
    MissingQuery,

    #[error("No results provided")]
    NoResults,

    #[error("Ollama is not running. Please start Ollama with 'ollama serve'")]
    OllamaUnavailable,
}

impl ServiceError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoData | Self::InvalidBody(_) | Self::MissingQuery | Self::NoResults => {
                StatusCode::BAD_REQUEST
            }
            Self::OllamaUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status(), Json(SummaryResponse::failure(self.to_string()))).into_response()
    }
}

/// Failures starting the service.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
