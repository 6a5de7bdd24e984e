//! Core configuration types

use serde::{Deserialize, Serialize};

use crate::utils::{
    DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_MODEL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SUMMARY_ENDPOINT, MAX_RESULTS, OLLAMA_GENERATE_TIMEOUT_SECS,
    OLLAMA_HEALTH_TIMEOUT_SECS, SUMMARY_MAX_TOKENS, TEMPERATURE,
};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LensConfig {
    /// Base URL of the summarization service the client posts to.
    pub(crate) summary_endpoint: String,

    /// Bind host of the local summarization service.
    pub(crate) server_host: String,

    /// Bind port of the local summarization service.
    pub(crate) server_port: u16,

    /// Ollama base URL, without trailing slash.
    pub(crate) ollama_host: String,

    /// Ollama model name.
    pub(crate) ollama_model: String,

    pub(crate) temperature: f32,
    pub(crate) max_tokens: u32,

    /// Upper bound on records extracted from a page.
    pub(crate) max_results: usize,

    /// Origins allowed by the service CORS layer. `*` allows any.
    ///
    /// The client runs inside whatever results page the user has open, so
    /// the default must accept every origin.
    pub(crate) allowed_origins: Vec<String>,

    pub(crate) health_timeout_secs: u64,
    pub(crate) generate_timeout_secs: u64,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            summary_endpoint: DEFAULT_SUMMARY_ENDPOINT.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            temperature: TEMPERATURE,
            max_tokens: SUMMARY_MAX_TOKENS,
            max_results: MAX_RESULTS,
            allowed_origins: vec!["*".to_string()],
            health_timeout_secs: OLLAMA_HEALTH_TIMEOUT_SECS,
            generate_timeout_secs: OLLAMA_GENERATE_TIMEOUT_SECS,
        }
    }
}

/// Errors raised while assembling a `LensConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {field} URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Environment variable {name} has an unparsable value '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}
