//! passgate CLI
//!
//! Prompt for a password, animate a verification bar, count down, exit.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use passgate::config;
use passgate::tui::run::run;
use passgate::tui::view::FAREWELL;

#[derive(Parser)]
#[command(name = "passgate")]
#[command(about = "Password prompt with a loading animation and exit countdown")]
#[command(version)]
struct Cli {
    /// Read configuration from this JSON file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the TUI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(&cli) {
        Ok(()) => println!("\n  {FAREWELL}\n"),
        // Startup failures are reported but still exit 0, like the
        // original program did.
        Err(e) => println!("could not start program: {e}"),
    }

    ExitCode::SUCCESS
}

fn start(cli: &Cli) -> Result<(), String> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    tracing::info!(
        entry_timeout_secs = config.entry_timeout_secs,
        exit_countdown_secs = config.exit_countdown_secs,
        "starting session"
    );

    run(&config).map_err(|e| e.to_string())
}

// ============================================================================
// LOGGING
// ============================================================================

/// Send tracing output to a file. Filter from RUST_LOG, default info.
fn init_logging(path: &Path) -> Result<(), String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passgate=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}
