//! Command-line interface for airtable-harness
//!
//! # Usage Examples
//!
//! ```bash
//! # Auto-detected backend (remote, then csv, then mock)
//! airtable-harness tables
//!
//! # Explicit CSV backend
//! airtable-harness --backend csv --data-dir ./data stats Tasks Status
//!
//! # Batch update through the remote API
//! AIRTABLE_API_KEY=pat... AIRTABLE_BASE_ID=app... airtable-harness bulk-update Tasks \
//!   --where-field Priority --where-value High --set '{"Status": "In Progress"}'
//! ```

use airtable_harness::{connect, run_with_backend, Command, ConfigArgs, HarnessConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "airtable-harness")]
#[command(about = "Run base scripts against the Airtable API, a CSV mirror, or an in-memory mock")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level / LOG_LEVEL
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&cli.config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = HarnessConfig::from_args(&cli.config)?;
    cli.command.validate()?;

    let mut backend = connect(&config).await?;
    tracing::debug!("Connected to {:?} backend", backend.kind());
    if cli.command.needs_discovery() {
        backend.discover_tables().await?;
    }

    for line in run_with_backend(&mut backend, cli.command).await? {
        println!("{line}");
    }
    Ok(())
}
