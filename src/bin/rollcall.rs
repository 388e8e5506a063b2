//! Rollcall Binary
//!
//! Runs one subcommand, or the interactive menu when none is given.

use std::io;

use clap::Parser;
use rollcall::cli::{self, Args, Command};
use rollcall::{FileStorage, StudentService};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Initialize tracing/logging (stderr, so it stays out of the menu)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();

    tracing::info!("Rollcall v{}", rollcall::VERSION);
    tracing::info!("Data directory: {}", config.storage.data_dir.display());

    if let Err(e) = config.validate().and_then(|_| config.ensure_directories_exist()) {
        tracing::error!("Failed to prepare directories: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let service = StudentService::new(FileStorage::new(config.storage.clone()));
    let command = args.command.clone().unwrap_or(Command::Menu);

    let stdin = io::stdin();
    if let Err(e) = cli::run(command, &service, &config, stdin.lock(), io::stdout().lock()) {
        tracing::error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
