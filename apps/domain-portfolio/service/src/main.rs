use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use domain_portfolio_service::config::{Config, LogFormat};
use domain_portfolio_service::serve;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "domain-portfolio-service", about = "Domain portfolio dashboard and JSON API")]
struct Cli {
    /// Address to bind, overriding PORT and PORTFOLIO_BIND_ADDR.
    #[arg(long)]
    bind_addr: Option<SocketAddr>,
    /// Tracing filter directive, overriding PORTFOLIO_LOG_FILTER.
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env().context("load configuration")?;
    if let Some(bind_addr) = cli.bind_addr {
        config.bind_addr = bind_addr;
    }
    if let Some(log_filter) = cli.log_filter {
        config.log_filter = log_filter;
    }

    init_tracing(&config);

    if config.is_embedded() {
        tracing::info!(
            target: "domain_portfolio.http",
            "embedded mode: router is mounted by the host, no listener started"
        );
        return Ok(());
    }

    serve(config).await.context("serve http")?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
