//! Fluent builder for `LensConfig`
//!
//! Every setter is optional; `build()` normalizes URLs and validates ranges.

use url::Url;

use super::types::{ConfigError, LensConfig};

/// Environment variables read by [`LensConfig::from_env`].
pub const ENV_SUMMARY_ENDPOINT: &str = "SEARCH_LENS_ENDPOINT";
pub const ENV_SERVER_HOST: &str = "SEARCH_LENS_HOST";
pub const ENV_SERVER_PORT: &str = "SEARCH_LENS_PORT";
pub const ENV_ALLOWED_ORIGINS: &str = "SEARCH_LENS_ALLOWED_ORIGINS";
pub const ENV_OLLAMA_HOST: &str = "OLLAMA_HOST";
pub const ENV_OLLAMA_MODEL: &str = "OLLAMA_MODEL";

#[derive(Debug, Clone, Default)]
pub struct LensConfigBuilder {
    inner: LensConfig,
}

impl LensConfig {
    /// Create a builder seeded with defaults.
    #[must_use]
    pub fn builder() -> LensConfigBuilder {
        LensConfigBuilder::default()
    }

    /// Builder seeded with this configuration, for layering overrides.
    #[must_use]
    pub fn to_builder(&self) -> LensConfigBuilder {
        LensConfigBuilder {
            inner: self.clone(),
        }
    }

    /// Build a configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable or invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Unset and blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable or invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(endpoint) = get(ENV_SUMMARY_ENDPOINT) {
            builder = builder.summary_endpoint(endpoint);
        }
        if let Some(host) = get(ENV_SERVER_HOST) {
            builder = builder.server_host(host);
        }
        if let Some(port) = get(ENV_SERVER_PORT) {
            let parsed = port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_SERVER_PORT,
                value: port.clone(),
            })?;
            builder = builder.server_port(parsed);
        }
        if let Some(origins) = get(ENV_ALLOWED_ORIGINS) {
            builder = builder.allowed_origins(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        if let Some(host) = get(ENV_OLLAMA_HOST) {
            builder = builder.ollama_host(host);
        }
        if let Some(model) = get(ENV_OLLAMA_MODEL) {
            builder = builder.ollama_model(model);
        }

        builder.build()
    }
}

impl LensConfigBuilder {
    #[must_use]
    pub fn summary_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.inner.summary_endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn server_host(mut self, host: impl Into<String>) -> Self {
        self.inner.server_host = host.into();
        self
    }

    #[must_use]
    pub fn server_port(mut self, port: u16) -> Self {
        self.inner.server_port = port;
        self
    }

    #[must_use]
    pub fn ollama_host(mut self, host: impl Into<String>) -> Self {
        self.inner.ollama_host = host.into();
        self
    }

    #[must_use]
    pub fn ollama_model(mut self, model: impl Into<String>) -> Self {
        self.inner.ollama_model = model.into();
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.inner.temperature = temperature;
        self
    }

    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.inner.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.inner.max_results = max_results;
        self
    }

    #[must_use]
    pub fn allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.inner.allowed_origins = origins;
        self
    }

    #[must_use]
    pub fn health_timeout_secs(mut self, secs: u64) -> Self {
        self.inner.health_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn generate_timeout_secs(mut self, secs: u64) -> Self {
        self.inner.generate_timeout_secs = secs;
        self
    }

    /// Validate and produce the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL does not parse as http(s), the model is
    /// blank, the temperature is outside `0.0..=2.0`, or the port or result
    /// limit is zero.
    pub fn build(self) -> Result<LensConfig, ConfigError> {
        let mut config = self.inner;

        config.summary_endpoint = normalize_http_url("summary_endpoint", &config.summary_endpoint)?;
        config.ollama_host = normalize_http_url("ollama_host", &config.ollama_host)?;

        config.ollama_model = config.ollama_model.trim().to_string();
        if config.ollama_model.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ollama_model",
                reason: "model name cannot be empty".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&config.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: format!("{} is outside 0.0..=2.0", config.temperature),
            });
        }

        if config.server_port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server_port",
                reason: "port cannot be zero".to_string(),
            });
        }

        if config.max_results == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_results",
                reason: "at least one result must be kept".to_string(),
            });
        }

        if config.allowed_origins.is_empty() {
            config.allowed_origins = vec!["*".to_string()];
        }

        Ok(config)
    }
}

/// Parse `value` as an http(s) URL and return it without a trailing slash.
fn normalize_http_url(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            value: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
