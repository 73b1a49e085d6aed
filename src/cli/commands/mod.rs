//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod search;
mod serve;
mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "seminario")]
#[command(about = "Conference seminar schedule service")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Schedule data file or URL (overrides config)
    #[arg(short, long, global = true)]
    data: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Bind address (port, host, or host:port)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Load the schedule data file and report what it contains
    Validate,

    /// Search the schedule from the terminal
    Search {
        /// Term to search for
        term: String,
        /// Restrict to one day (e.g. dia1)
        #[arg(long)]
        day: Option<String>,
    },
}

/// Parse arguments, load settings, and dispatch.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        settings.schedule_source = data;
    }

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Validate => validate::cmd_validate(&settings).await,
        Commands::Search { term, day } => search::cmd_search(&settings, &term, day.as_deref()).await,
    }
}

/// Build the schedule service the commands share.
pub(crate) fn create_service(
    settings: &Settings,
) -> anyhow::Result<crate::schedule::ScheduleService> {
    let source = crate::schedule::source_from_spec(
        &settings.schedule_source,
        &settings.user_agent,
        settings.request_timeout,
    )?;
    Ok(crate::schedule::ScheduleService::new(
        source,
        settings.assignments(),
    ))
}
