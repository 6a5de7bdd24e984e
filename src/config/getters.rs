//! Getter methods for `LensConfig`

use std::time::Duration;

use super::types::LensConfig;

impl LensConfig {
    #[must_use]
    pub fn summary_endpoint(&self) -> &str {
        &self.summary_endpoint
    }

    #[must_use]
    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    #[must_use]
    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    #[must_use]
    pub fn ollama_host(&self) -> &str {
        &self.ollama_host
    }

    #[must_use]
    pub fn ollama_model(&self) -> &str {
        &self.ollama_model
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    #[must_use]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    #[must_use]
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    #[must_use]
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    #[must_use]
    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }
}
