//! # Linea - A Bounded Line Editor
//!
//! An in-memory, line-oriented text editor with word/line level editing
//! and depth-limited undo/redo. All state lives in memory for the
//! lifetime of the session; exiting discards everything.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the editor
//! cargo run
//!
//! # Run with a custom config file
//! cargo run -- --config path/to/config.toml
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod shell;

use config::Config;
use linea_buffer::LineBuffer;
use shell::Shell;

/// Linea - a bounded in-memory line editor with undo/redo
#[derive(Parser, Debug)]
#[command(name = "linea")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Linea v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => Config::load(),
    };

    // One engine instance per session; no global state.
    let engine = LineBuffer::with_config(config.buffer_config());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(engine, stdin.lock(), stdout.lock());
    shell.run()?;

    Ok(())
}
