//! Manus CLI
//!
//! Command-line interface for the Manus task gateway.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "manus")]
#[command(about = "Manus task gateway CLI", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// API key for the gateway
    #[arg(long, env = "MANUS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gateway URL
    #[arg(long, default_value = manus_client::DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "manus_cli=info,manus_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(config) = Config::new(cli.api_key, cli.base_url) else {
        eprintln!(
            "{} MANUS_API_KEY is not set (export it or pass --api-key)",
            "Error:".red().bold()
        );
        std::process::exit(1);
    };

    debug!(
        "Using gateway {} with key {}",
        config.base_url,
        config.gateway().masked_key()
    );

    handle_command(cli.command, &config).await
}
