//! Shared constants for search-lens
//!
//! Defaults and fixed strings used across the pipeline, the overlay and the
//! local summarization service.

/// Maximum number of result records forwarded for summarization.
///
/// Extraction truncates (never samples): the first matches in document order
/// are kept.
pub const MAX_RESULTS: usize = 10;

/// Reserved DOM id of the overlay root. At most one element carries it.
pub const OVERLAY_ID: &str = "ai-search-overlay";

/// Default base URL of the summarization service.
pub const DEFAULT_SUMMARY_ENDPOINT: &str = "http://localhost:5000";

/// Default bind address of the local summarization service.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default bind port of the local summarization service.
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default Ollama base URL.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Default Ollama model used for summaries.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b";

/// Token budget for a generated summary (`num_predict`).
pub const SUMMARY_MAX_TOKENS: u32 = 500;

/// Sampling temperature for summaries. Low on purpose: summaries should stay
/// close to the snippets.
pub const TEMPERATURE: f32 = 0.3;

/// Characters of each snippet included in the prompt.
pub const MAX_RESULT_LENGTH: usize = 300;

/// Timeout for Ollama health and model listing requests (seconds).
pub const OLLAMA_HEALTH_TIMEOUT_SECS: u64 = 5;

/// Timeout for Ollama generation requests (seconds).
pub const OLLAMA_GENERATE_TIMEOUT_SECS: u64 = 60;

/// Service name reported by `GET /health`.
pub const SERVICE_NAME: &str = "AI Search Enhancer";

/// Name of the CDP runtime binding overlay scripts report events through.
pub const EVENT_BINDING: &str = "__searchLensEvent";
