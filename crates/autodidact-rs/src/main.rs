//! `autodidact` HTTP service entry point.

use anyhow::Context;
use autodidact_rs::build_state;
use autodidact_rs::config::{AutodidactConfig, LayeredConfigOptions};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line options for the service.
#[derive(Parser)]
#[command(name = "autodidact", version)]
struct Cli {
    /// Extra autodidact.json5 layers, applied in order after user and cwd configs
    #[arg(long = "config")]
    configs: Vec<PathBuf>,
    /// Listen host override
    #[arg(long)]
    host: Option<String>,
    /// Listen port override
    #[arg(long)]
    port: Option<u16>,
    /// Answer every search from the built-in fallback table
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting autodidact (config_layers={}, host_set={}, port_set={}, offline={})",
        cli.configs.len(),
        cli.host.is_some(),
        cli.port.is_some(),
        cli.offline
    );

    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let options = cli
        .configs
        .iter()
        .fold(LayeredConfigOptions::new(&cwd), |options, path| {
            options.with_runtime_path(path)
        });
    let layered = AutodidactConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());

    let mut config = layered.config;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.offline {
        config.search.enabled = false;
    }
    config.validate().context("invalid configuration")?;

    let state = Arc::new(build_state(&config)?);
    let addr = config.server.bind_address();
    autodidact_rs::server::serve(state, &addr)
        .await
        .with_context(|| format!("server failed on {addr}"))
}
