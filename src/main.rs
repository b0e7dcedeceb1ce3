//! `tekmetric-gateway` server binary.

// std
use std::{net::SocketAddr, sync::Arc};
// crates.io
use clap::Parser;
use color_eyre::Result;
use tokio::net::TcpListener;
// self
use tekmetric_gateway::{
	api,
	config::GatewayConfig,
	gateway::Gateway,
	obs::{self, LogFormat},
};

/// Thin HTTP gateway in front of the Tekmetric shop-management API.
#[derive(Debug, Parser)]
#[command(name = "tekmetric-gateway", version, about)]
struct Cli {
	/// Listen address; overrides `GATEWAY_BIND` and `PORT`.
	#[arg(long, env = "GATEWAY_BIND")]
	bind: Option<SocketAddr>,
	/// Log filter used when `RUST_LOG` is unset.
	#[arg(long, default_value = obs::DEFAULT_LOG_FILTER)]
	log_filter: String,
	/// Log output format (`text` or `json`).
	#[arg(long, env = "LOG_FORMAT", default_value = "text")]
	log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	// A missing `.env` is fine; the process environment may already be populated.
	let _ = dotenvy::dotenv();
	let cli = Cli::parse();

	obs::install_subscriber(&cli.log_filter, cli.log_format);

	let mut config = GatewayConfig::from_env()?;

	if let Some(bind) = cli.bind {
		config.bind = bind;
	}

	tracing::info!(?config, "Starting gateway.");

	let gateway = Arc::new(Gateway::from_config(&config)?);
	let listener = TcpListener::bind(config.bind).await?;

	tracing::info!(addr = %listener.local_addr()?, "Listening.");

	axum::serve(listener, api::router(gateway)).with_graceful_shutdown(shutdown_signal()).await?;

	tracing::info!("Gateway stopped.");

	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
	}
}
