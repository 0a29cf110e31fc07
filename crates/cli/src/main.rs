//! scout CLI — the main entry point.
//!
//! Commands:
//! - `run`    — Execute a research task and publish the digest
//! - `tasks`  — List registered tasks

use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(
    name = "scout",
    about = "scout — scheduled research-digest agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a research task and publish the digest
    Run {
        /// Task to run
        #[arg(default_value = "garment-research")]
        task: String,

        /// Override the configured lookback window in days
        #[arg(long)]
        lookback_days: Option<u32>,

        /// Skip publishing; print the filtered digest as JSON instead
        #[arg(long)]
        skip_publish: bool,
    },

    /// List registered tasks
    Tasks,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Console output plus an in-memory capture that travels with the
    // published report as the execution log.
    let log_buffer = logging::LogBuffer::new();
    let filter = if cli.verbose { "debug" } else { "info" };
    logging::init(filter, log_buffer.clone());

    match cli.command {
        Commands::Run {
            task,
            lookback_days,
            skip_publish,
        } => commands::run::run(&task, lookback_days, skip_publish, log_buffer).await?,
        Commands::Tasks => commands::tasks::run(),
    }

    Ok(())
}
