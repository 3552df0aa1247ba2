//! CORS proxy server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 CORS PROXY                   │
//!   Client Request       │  ┌────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────────┼─▶│  http  │──▶│ dispatch │──▶│ translate │  │
//!   GET /https://x/y     │  │ server │   └────┬─────┘   └─────┬─────┘  │
//!                        │  └────────┘        │ OPTIONS       ▼        │
//!                        │                    ▼         ┌───────────┐  │
//!   Client Response      │  ┌────────┐   ┌──────────┐   │ upstream  │──┼──▶ https://x/y
//!   ◀────────────────────┼──│  cors  │◀──│  relay / │◀──│  client   │◀─┼───
//!   + Access-Control-*   │  │headers │   │ preflight│   └───────────┘  │
//!                        │  └────────┘   └──────────┘                  │
//!                        │  config · activity log · tracing · shutdown │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_proxy::config::{read_config, validate_config, ConfigError, ProxyConfig};
use cors_proxy::observability::logging;
use cors_proxy::{HttpServer, ProxyHandler, Shutdown};

#[derive(Parser)]
#[command(name = "cors-proxy")]
#[command(about = "Open CORS proxy: GET /<url> fetches <url> with CORS headers added", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overriding listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Allowed method (repeatable), overriding cors.allowed_methods.
    #[arg(short, long = "method", value_name = "METHOD")]
    methods: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if !cli.methods.is_empty() {
        config.cors.allowed_methods = cli.methods;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);

    tracing::info!("cors-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        allowed_methods = ?config.cors.allowed_methods,
        activity_log = ?config.activity_log,
        "Configuration loaded"
    );

    let handler = ProxyHandler::from_config(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.listen_for_signals();

    HttpServer::new(handler).run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
