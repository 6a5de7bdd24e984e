//! HTTP client for the summarization service

use reqwest::Client;
use tracing::{debug, info, warn};

use super::types::{SummaryRequest, SummaryResponse};
use crate::config::LensConfig;
use crate::extractor::ResultSet;
use crate::page_context::Query;

/// Transport-level failures talking to the summarization service.
///
/// A failure reported *by* the service is not an error here; it arrives as
/// `SummaryResponse::Failure`.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Failed to reach summarization service: {0}")]
    Send(#[source] reqwest::Error),

    #[error("Failed to read summarization response: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("summarization service returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Malformed summarization response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Single-shot client for `POST {endpoint}/summarize`.
///
/// No retries and no client-side timeout: one attempt, one round trip.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    http: Client,
    endpoint: String,
}

impl SummaryClient {
    /// Create a client for the service at `endpoint` (e.g. `http://localhost:5000`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    #[must_use]
    pub fn from_config(config: &LensConfig) -> Self {
        Self::new(config.summary_endpoint())
    }

    #[must_use]
    pub fn summarize_url(&self) -> String {
        format!("{}/summarize", self.endpoint)
    }

    /// Send the query and results and decode the service's answer.
    ///
    /// Any body that decodes as a summary response is returned as received,
    /// whatever the HTTP status: the service reports its own failures with a
    /// 4xx/5xx status and a failure body.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] when the service cannot be reached, the
    /// body cannot be read, or the body is not a summary response.
    pub async fn request(
        &self,
        query: &Query,
        results: &ResultSet,
    ) -> Result<SummaryResponse, SummaryError> {
        let url = self.summarize_url();
        info!("Requesting summary for '{}' ({} results) from {}", query, results.len(), url);

        let response = self
            .http
            .post(&url)
            .json(&SummaryRequest { query, results })
            .send()
            .await
            .map_err(SummaryError::Send)?;

        let status = response.status();
        let body = response.bytes().await.map_err(SummaryError::ReadBody)?;

        match serde_json::from_slice::<SummaryResponse>(&body) {
            Ok(summary) => {
                debug!(status = status.as_u16(), success = summary.is_success(), "Summary response decoded");
                Ok(summary)
            }
            Err(e) if !status.is_success() => {
                warn!("Summarization service returned HTTP {} with undecodable body: {}", status, e);
                Err(SummaryError::HttpStatus {
                    status: status.as_u16(),
                })
            }
            Err(e) => Err(SummaryError::Decode(e)),
        }
    }

    /// Like [`request`](Self::request), but never fails.
    ///
    /// Transport errors become `SummaryResponse::Failure` carrying the
    /// error's description.
    pub async fn get_summary(&self, query: &Query, results: &ResultSet) -> SummaryResponse {
        match self.request(query, results).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Summary request failed: {}", e);
                SummaryResponse::failure(e.to_string())
            }
        }
    }
}
