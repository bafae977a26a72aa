//! Atelier CLI — the main entry point.
//!
//! Commands:
//! - `run <agent> <input…>`  — Run a single agent
//! - `pipeline <input…>`     — Run the full agent pipeline
//! - `pattern <input…>`      — Run with keyword-routed pattern fallback
//! - `status`                — Show configuration and runtime status
//! - `push`                  — Commit and push workspace changes
//! - `memory <action>`       — Export / import / inspect the memory snapshot

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "atelier",
    about = "Atelier — programmable agent runtime for design critique and evaluation",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON config file
    #[arg(short, long, global = true, default_value = atelier_config::CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single agent on a prompt
    Run {
        /// Agent name (design, evaluator, creative, prompt)
        agent: String,
        /// Input prompt (remaining words are joined)
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },

    /// Run the full agent pipeline on a prompt
    Pipeline {
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },

    /// Run with keyword-routed pattern fallback
    Pattern {
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },

    /// Show configuration and runtime status
    Status,

    /// Commit workspace changes and push to the remote
    Push,

    /// Memory snapshot management
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },
}

#[derive(Subcommand)]
enum MemoryAction {
    /// Write the current memory snapshot to a JSON file
    Export {
        /// Target file (defaults to the memory file next to the config)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Merge a JSON snapshot file into memory
    Import {
        /// Source file (defaults to the memory file next to the config)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show memory statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = atelier_config::AppConfig::load_from(&cli.config)
        .map_err(|e| format!("Failed to load config: {e}"))?;

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { config.effective_log_level() };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run { agent, input } => {
            commands::run::run(&config, &cli.config, &agent, &input.join(" ")).await?
        }
        Commands::Pipeline { input } => {
            commands::pipeline::run(&config, &cli.config, &input.join(" ")).await?
        }
        Commands::Pattern { input } => {
            commands::pattern::run(&config, &cli.config, &input.join(" ")).await?
        }
        Commands::Status => commands::status::run(&config, &cli.config).await?,
        Commands::Push => commands::push::run(&config).await?,
        Commands::Memory { action } => match action {
            MemoryAction::Export { file } => {
                commands::memory::export(&config, &cli.config, file).await?
            }
            MemoryAction::Import { file } => {
                commands::memory::import(&config, &cli.config, file).await?
            }
            MemoryAction::Stats => commands::memory::stats(&config, &cli.config).await?,
        },
    }

    Ok(())
}
