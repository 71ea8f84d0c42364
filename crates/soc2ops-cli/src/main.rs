//! soc2ops entry point

use anyhow::Result;
use clap::Parser;
use soc2ops_cli::commands::{Cli, CommandExecutor};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut executor = CommandExecutor::new();
    let result = executor.execute(cli.command).await?;

    if result.success {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}
