//! Summarization request and response contract

use serde::{Deserialize, Serialize};

use crate::extractor::ResultSet;
use crate::page_context::Query;

/// Body of `POST {endpoint}/summarize`.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest<'a> {
    pub query: &'a Query,
    pub results: &'a ResultSet,
}

/// Outcome reported by the summarization service.
///
/// On the wire this is a flat object discriminated by a boolean `success`
/// field; see [`WireResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireResponse", into = "WireResponse")]
pub enum SummaryResponse {
    Success(SuccessPayload),
    Failure(FailurePayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessPayload {
    pub query: String,
    pub summary: String,
    pub num_results: u64,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailurePayload {
    pub error: String,
}

impl SummaryResponse {
    /// Failure with the given message.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(FailurePayload {
            error: error.into(),
        })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Flat wire shape: `{success: true, query, summary, num_results, model}` or
/// `{success: false, error}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_results: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Message used when a failure body carries no `error` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";

impl TryFrom<WireResponse> for SummaryResponse {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        if !wire.success {
            return Ok(Self::failure(
                wire.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ));
        }

        let missing = |field: &str| format!("successful summary response is missing '{field}'");
        Ok(Self::Success(SuccessPayload {
            query: wire.query.ok_or_else(|| missing("query"))?,
            summary: wire.summary.ok_or_else(|| missing("summary"))?,
            num_results: wire.num_results.ok_or_else(|| missing("num_results"))?,
            model: wire.model.ok_or_else(|| missing("model"))?,
        }))
    }
}

impl From<SummaryResponse> for WireResponse {
    fn from(response: SummaryResponse) -> Self {
        match response {
            SummaryResponse::Success(payload) => Self {
                success: true,
                query: Some(payload.query),
                summary: Some(payload.summary),
                num_results: Some(payload.num_results),
                model: Some(payload.model),
                error: None,
            },
            SummaryResponse::Failure(payload) => Self {
                success: false,
                error: Some(payload.error),
                ..Self::default()
            },
        }
    }
}
