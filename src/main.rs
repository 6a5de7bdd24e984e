//! `search-lens`: summarize the search results page open in Chrome, or run
//! the local summarization service it talks to.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use search_lens::LensConfig;

#[derive(Debug, Parser)]
#[command(name = "search-lens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize the results page open in a running Chrome.
    Run {
        /// DevTools endpoint (ws://... or http://host:9222).
        #[arg(long, env = "SEARCH_LENS_CDP")]
        cdp: String,

        /// Summarization service base URL.
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Run the local summarization service.
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let base = LensConfig::from_env().context("Invalid configuration in environment")?;

    match cli.command {
        Command::Run { cdp, endpoint } => {
            let mut builder = base.to_builder();
            if let Some(endpoint) = endpoint {
                builder = builder.summary_endpoint(endpoint);
            }
            let config = builder.build().context("Invalid --endpoint")?;
            search_lens::run_in_browser(&config, &cdp).await
        }
        Command::Serve { host, port } => {
            let mut builder = base.to_builder();
            if let Some(host) = host {
                builder = builder.server_host(host);
            }
            if let Some(port) = port {
                builder = builder.server_port(port);
            }
            let config = builder.build().context("Invalid service address")?;
            search_lens::service::serve(&config).await?;
            Ok(())
        }
    }
}
