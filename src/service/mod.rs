//! Local summarization service
//!
//! Small HTTP service that turns submitted search results into a summary
//! using a local Ollama model. The overlay pipeline talks to it through
//! `SummaryClient`.

mod error;
pub mod ollama;
pub mod prompt;
mod routes;
pub mod samples;

pub use error::{ServeError, ServiceError};
pub use ollama::{OllamaClient, OllamaError, OllamaStatus};
pub use prompt::SubmittedResult;
pub use routes::{HealthResponse, ModelsResponse, SearchResponse, ServiceState, router};

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::LensConfig;

/// Build the router for `config`.
pub fn app(config: &LensConfig) -> axum::Router {
    let state = Arc::new(ServiceState {
        ollama: OllamaClient::from_config(config),
    });
    router(state, config.allowed_origins())
}

/// Bind and serve until the process is stopped.
///
/// # Errors
///
/// Returns a [`ServeError`] if the address cannot be bound or the listener
/// fails.
pub async fn serve(config: &LensConfig) -> Result<(), ServeError> {
    let status = OllamaClient::from_config(config).status().await;
    match (&status.connected, &status.error) {
        (true, None) => info!("Ollama connected at {} with model {}", status.host, config.ollama_model()),
        (true, Some(e)) => warn!("Ollama connected at {} but: {}", status.host, e),
        (false, _) => warn!("Ollama not reachable at {}; start it with 'ollama serve'", status.host),
    }

    let listener = TcpListener::bind((config.server_host(), config.server_port())).await?;
    info!("Summarization service listening on {}", listener.local_addr()?);
    info!("CORS enabled for: {}", config.allowed_origins().join(", "));

    axum::serve(listener, app(config)).await?;
    Ok(())
}
