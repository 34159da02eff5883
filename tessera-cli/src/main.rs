//! Tessera CLI
//!
//! Command-line interface for scheduling data-quality test suites and
//! browsing the service catalog.

mod commands;
mod config;
mod id_resolver;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Tessera test-suite scheduling CLI", long_about = None)]
struct Cli {
    /// Catalog server URL
    #[arg(long, env = "TESSERA_SERVER_URL", default_value = "http://localhost:8585")]
    server_url: String,

    /// Bearer token for the catalog API
    #[arg(long, env = "TESSERA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Schedule frequencies allowed by feature limits (comma-separated)
    #[arg(long, env = "TESSERA_SCHEDULE_OPTIONS", value_delimiter = ',')]
    schedule_options: Vec<String>,

    /// Enforce feature limits
    #[arg(long, env = "TESSERA_LIMITS_ENABLED")]
    limits_enabled: bool,

    /// Delay in milliseconds before the deploy overlay is dismissed
    #[arg(long, env = "TESSERA_DEPLOY_OVERLAY_MS", default_value = "500")]
    deploy_overlay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tessera=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.server_url)
        .with_token(cli.token)
        .with_schedule_options(cli.schedule_options)
        .with_limits(cli.limits_enabled)
        .with_overlay_delay_ms(cli.deploy_overlay_ms);
    config.validate()?;

    handle_command(cli.command, &config).await
}
