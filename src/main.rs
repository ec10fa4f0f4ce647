//! Prefix proxy binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use prefix_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig};
use prefix_proxy::net::load_tls_config;
use prefix_proxy::observability::init_logging;
use prefix_proxy::{HttpServer, RouteTable, Shutdown};

#[derive(Parser)]
#[command(name = "prefix-proxy")]
#[command(about = "Path-prefix reverse proxy", long_about = None)]
struct Cli {
    /// Proxy configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route document (TOML); overrides `routes.file`.
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Listen address; overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(routes) = cli.routes {
        config.routes.file = Some(routes);
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);
    tracing::info!("prefix-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let routes = RouteTable::load(&config.routes.source());
    for entry in routes.entries() {
        tracing::info!(
            prefix = %entry.prefix(),
            target = %entry.target(),
            credential = entry.has_credential(),
            "Route registered"
        );
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let addr: SocketAddr = config.listener.bind_address.parse()?;
    let tls = config.listener.tls.clone();
    let server = HttpServer::new(config, routes)?;

    match tls {
        Some(tls) => {
            let rustls = load_tls_config(&tls).await?;
            server.run_tls(addr, rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(addr).await?;
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
