//! Roblox API Reverse Proxy
//!
//! Forwards requests to the subdomains of roblox.com, retrying transport
//! failures, and relays the upstream response verbatim.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────────┐
//!                  │                         ROPROXY                           │
//!                  │                                                           │
//!  Client Request  │  ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌───────┐ │
//!  ────────────────┼─▶│ security │──▶│  http    │──▶│  routing  │──▶│upstream│─┼──▶ *.roblox.com
//!                  │  │ PROXYKEY │   │ request  │   │ translator│   │retries │ │
//!                  │  └──────────┘   └──────────┘   └───────────┘   └───┬───┘ │
//!                  │                                                    │     │
//!  Client Response │                 ┌──────────┐                       │     │
//!  ◀───────────────┼─────────────────│  http    │◀──────────────────────┘     │
//!                  │                 │ response │                             │
//!                  │                 └──────────┘                             │
//!                  │  config · observability · resilience · lifecycle · net    │
//!                  └──────────────────────────────────────────────────────────┘
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use roproxy::config::{load_config, ProxyConfig};
use roproxy::lifecycle::{signals, Shutdown};
use roproxy::net;
use roproxy::observability::{logging, metrics};
use roproxy::HttpServer;

#[derive(Parser)]
#[command(name = "roproxy")]
#[command(about = "Reverse proxy for the Roblox web APIs", long_about = None)]
struct Cli {
    /// TOML configuration file. Environment variables override its values.
    #[arg(short, long, env = "ROPROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init_tracing("info");
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    logging::init_tracing(&config.observability.log_level);

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ProxyConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!("roproxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        listen_port = %config.listener.listen_port,
        timeout_secs = config.upstream.timeout_seconds,
        max_retries = config.upstream.max_retries,
        gated = config.security.shared_secret.is_some(),
        "Configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        metrics::init_metrics(addr.parse()?)?;
    }

    let listener_config = config.listener.clone();
    let server = HttpServer::new(config)?;
    let listener = net::bind(&listener_config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;
    Ok(())
}
