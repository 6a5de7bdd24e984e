//! Ollama HTTP client used by the summarization service

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use super::prompt::{SYSTEM_PROMPT, SubmittedResult, build_prompt};
use crate::config::LensConfig;
use crate::summary::{SuccessPayload, SummaryResponse};

/// Error text returned when the model produced nothing usable.
pub const GENERATION_FAILED: &str = "Failed to generate summary";

#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    #[error("Ollama request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Ollama returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Ollama returned an empty response")]
    EmptyResponse,
}

/// Connection report served by `GET /ollama/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaStatus {
    pub connected: bool,
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_models: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for a local Ollama instance.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    host: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    health_timeout: Duration,
    generate_timeout: Duration,
}

impl OllamaClient {
    #[must_use]
    pub fn from_config(config: &LensConfig) -> Self {
        Self {
            http: Client::new(),
            host: config.ollama_host().trim_end_matches('/').to_string(),
            model: config.ollama_model().to_string(),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            health_timeout: config.health_timeout(),
            generate_timeout: config.generate_timeout(),
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.host)
    }

    /// Whether Ollama answers `GET /api/tags` with 200.
    pub async fn check_health(&self) -> bool {
        match self
            .http
            .get(self.tags_url())
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                debug!("Ollama health check failed: {}", e);
                false
            }
        }
    }

    /// Names of the locally installed models.
    ///
    /// # Errors
    ///
    /// Returns an [`OllamaError`] if Ollama is unreachable or answers with a
    /// non-200 status.
    pub async fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let response = self
            .http
            .get(self.tags_url())
            .timeout(self.health_timeout)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Run one non-streaming generation and return the trimmed text.
    ///
    /// # Errors
    ///
    /// Returns an [`OllamaError`] on transport failure, a non-200 status, or
    /// an empty response.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, OllamaError> {
        let mut body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": self.temperature,
                "num_predict": self.max_tokens,
            },
        });
        if let (Some(system), Some(map)) = (system, body.as_object_mut()) {
            map.insert("system".to_string(), json!(system));
        }

        let response = self
            .http
            .post(format!("{}/api/generate", self.host))
            .timeout(self.generate_timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let generated: GenerateResponse = response.json().await?;
        let text = generated.response.trim();
        if text.is_empty() {
            return Err(OllamaError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    /// Summarize `results` for `query`.
    ///
    /// Generation failures are reported as a failure response, never as an
    /// error.
    pub async fn summarize(&self, query: &str, results: &[SubmittedResult]) -> SummaryResponse {
        let prompt = build_prompt(query, results);
        debug!(chars = prompt.len(), "Prompt built for '{}'", query);

        match self.generate(&prompt, Some(SYSTEM_PROMPT)).await {
            Ok(summary) => {
                info!("Generated summary for '{}' with {}", query, self.model);
                SummaryResponse::Success(SuccessPayload {
                    query: query.to_string(),
                    summary,
                    num_results: results.len() as u64,
                    model: self.model.clone(),
                })
            }
            Err(e) => {
                warn!("Ollama generation failed: {}", e);
                SummaryResponse::failure(GENERATION_FAILED)
            }
        }
    }

    /// Probe Ollama and check that the configured model is installed.
    pub async fn status(&self) -> OllamaStatus {
        let mut status = OllamaStatus {
            connected: false,
            host: self.host.clone(),
            model: None,
            available_models: None,
            error: None,
        };

        if !self.check_health().await {
            status.error = Some("Ollama is not running or not accessible".to_string());
            return status;
        }
        status.connected = true;

        let models = self.list_models().await.unwrap_or_else(|e| {
            warn!("Failed to list Ollama models: {}", e);
            Vec::new()
        });

        if models.iter().any(|m| m == &self.model) {
            status.model = Some(self.model.clone());
        } else {
            status.error = Some(format!("Model '{}' not found", self.model));
        }
        status.available_models = Some(models);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn client_for(server: &mockito::Server) -> OllamaClient {
        let config = LensConfig::builder()
            .ollama_host(server.url())
            .ollama_model("llama3")
            .build()
            .unwrap();
        OllamaClient::from_config(&config)
    }

    fn results() -> Vec<SubmittedResult> {
        vec![SubmittedResult {
            title: "The Book".to_string(),
            url: "https://doc.rust-lang.org/book/".to_string(),
            snippet: "Ownership rules.".to_string(),
        }]
    }

    #[tokio::test]
    async fn status_reports_missing_model() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body(json!({"models": [{"name": "mistral:7b"}]}).to_string())
            .expect_at_least(1)
            .create_async()
            .await;

        let status = client_for(&server).await.status().await;
        assert!(status.connected);
        assert_eq!(status.error.as_deref(), Some("Model 'llama3' not found"));
        assert_eq!(status.available_models, Some(vec!["mistral:7b".to_string()]));
    }

    #[tokio::test]
    async fn status_reports_unreachable() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/api/tags").with_status(500).create_async().await;

        let status = client_for(&server).await.status().await;
        assert!(!status.connected);
        assert_eq!(status.error.as_deref(), Some("Ollama is not running or not accessible"));
    }

    #[tokio::test]
    async fn summarize_sends_options_and_trims() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "llama3",
                "stream": false,
                "options": {"num_predict": 500}
            })))
            .with_status(200)
            .with_body(json!({"response": "  A summary.\n"}).to_string())
            .create_async()
            .await;

        let response = client_for(&server).await.summarize("rust", &results()).await;
        mock.assert_async().await;

        let SummaryResponse::Success(payload) = response else {
            panic!("expected success");
        };
        assert_eq!(payload.summary, "A summary.");
        assert_eq!(payload.num_results, 1);
        assert_eq!(payload.model, "llama3");
    }

    #[tokio::test]
    async fn empty_generation_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body(json!({"response": "   "}).to_string())
            .create_async()
            .await;

        let response = client_for(&server).await.summarize("rust", &results()).await;
        assert_eq!(response, SummaryResponse::failure(GENERATION_FAILED));
    }
}
