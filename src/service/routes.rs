//! HTTP routes
//!
//! ```text
//! GET  /health         - liveness
//! GET  /ollama/status  - Ollama connectivity and model check
//! GET  /models         - installed models and the configured one
//! POST /summarize      - summarize submitted results
//! POST /search         - summarize built-in demo results for a query
//! POST /test           - summarize a fixed sample (smoke test)
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::error::ServiceError;
use super::ollama::{OllamaClient, OllamaStatus};
use super::prompt::SubmittedResult;
use super::samples::{SMOKE_TEST_QUERY, demo_results, smoke_test_results};
use crate::summary::SummaryResponse;
use crate::utils::SERVICE_NAME;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub ollama: OllamaClient,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub current: String,
}

#[derive(Debug, Deserialize)]
struct SummarizeBody {
    #[serde(default)]
    query: String,
    #[serde(default)]
    results: Vec<SubmittedResult>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchBody {
    #[serde(default)]
    query: String,
}

/// Answer of `POST /search`: the summary fields plus the results summarized.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub summary: SummaryResponse,
    pub results: Vec<SubmittedResult>,
}

/// Build the service router with CORS for `allowed_origins` (`*` for any).
pub fn router(state: Arc<ServiceState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ollama/status", get(ollama_status))
        .route("/models", get(list_models))
        .route("/summarize", post(summarize))
        .route("/search", post(search))
        .route("/test", post(smoke_test))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([header::CONTENT_TYPE])
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

async fn ollama_status(State(state): State<Arc<ServiceState>>) -> Json<OllamaStatus> {
    Json(state.ollama.status().await)
}

async fn list_models(State(state): State<Arc<ServiceState>>) -> Json<ModelsResponse> {
    let models = state.ollama.list_models().await.unwrap_or_else(|e| {
        warn!("Failed to list Ollama models: {}", e);
        Vec::new()
    });
    Json(ModelsResponse {
        models,
        current: state.ollama.model().to_string(),
    })
}

async fn summarize(
    State(state): State<Arc<ServiceState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    let request = parse_body(&body)?;

    let query = request.query.trim();
    if query.is_empty() {
        return Err(ServiceError::MissingQuery);
    }
    if request.results.is_empty() {
        return Err(ServiceError::NoResults);
    }

    if !state.ollama.check_health().await {
        warn!("Rejecting summary request: Ollama unavailable at {}", state.ollama.host());
        return Err(ServiceError::OllamaUnavailable);
    }

    info!("Summarizing {} results for '{}'", request.results.len(), query);
    let response: SummaryResponse = state.ollama.summarize(query, &request.results).await;
    Ok(Json(response))
}

async fn search(
    State(state): State<Arc<ServiceState>>,
    body: Bytes,
) -> Result<Json<SearchResponse>, ServiceError> {
    let request: SearchBody = serde_json::from_slice(&body).unwrap_or_default();
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ServiceError::MissingQuery);
    }

    let results = demo_results(query);
    if !state.ollama.check_health().await {
        warn!("Rejecting search request: Ollama unavailable at {}", state.ollama.host());
        return Err(ServiceError::OllamaUnavailable);
    }

    info!("Summarizing {} demo results for '{}'", results.len(), query);
    let summary = state.ollama.summarize(query, &results).await;
    Ok(Json(SearchResponse { summary, results }))
}

/// No health check: a dead Ollama shows up as a generation failure.
async fn smoke_test(State(state): State<Arc<ServiceState>>) -> Json<SummaryResponse> {
    info!("Running smoke-test summary against {}", state.ollama.host());
    Json(state.ollama.summarize(SMOKE_TEST_QUERY, &smoke_test_results()).await)
}

/// Absent, malformed, or empty JSON all count as "no data".
fn parse_body(body: &[u8]) -> Result<SummarizeBody, ServiceError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ServiceError::NoData)?;

    let empty = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Number(_) => false,
    };
    if empty {
        return Err(ServiceError::NoData);
    }

    serde_json::from_value(value).map_err(|e| ServiceError::InvalidBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bodies_are_no_data() {
        for body in ["", "null", "{}", "[]", "not json"] {
            assert!(matches!(parse_body(body.as_bytes()), Err(ServiceError::NoData)), "{body}");
        }
    }

    #[test]
    fn missing_fields_default() {
        let request = parse_body(br#"{"query": "rust"}"#).unwrap();
        assert_eq!(request.query, "rust");
        assert!(request.results.is_empty());
    }

    #[test]
    fn wrong_shape_is_invalid() {
        assert!(matches!(
            parse_body(br#"{"query": "rust", "results": "none"}"#),
            Err(ServiceError::InvalidBody(_))
        ));
    }
}
