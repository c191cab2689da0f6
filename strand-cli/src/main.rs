use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Commands};
use strand_core::StrandError;

fn main() {
    // Initialize logging with STRAND_LOG environment variable support
    let log_level = std::env::var("STRAND_LOG").unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);

            // Use appropriate exit codes based on error type
            let exit_code = match e.downcast_ref::<StrandError>() {
                Some(StrandError::Configuration(_)) => 2,
                Some(StrandError::Io(_)) => 3,
                Some(StrandError::Parse(_) | StrandError::InvalidInput(_)) => 4,
                Some(StrandError::ToolMissing { .. } | StrandError::ToolNotFound(_)) => 5,
                _ => 1,
            };
            process::exit(exit_code);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let registry = strand_tools::load_all_tools();

    match cli.command {
        Commands::List { family } => {
            commands::list(&registry, family.as_deref())?;
            Ok(0)
        }
        Commands::Render { tool, args } => {
            commands::render(&registry, &tool, &args)?;
            Ok(0)
        }
        Commands::Run { tool, args } => commands::run(&registry, &tool, &args),
        Commands::Catalog { root } => {
            commands::catalog(&root)?;
            Ok(0)
        }
        Commands::Doctor { catalog } => {
            commands::doctor(&registry, catalog.as_deref())?;
            Ok(0)
        }
    }
}
