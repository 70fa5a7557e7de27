mod diagnose;
mod generate;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use l10ngen::config::{DEFAULT_CONFIG_FILE, DEFAULT_DIAGNOSE_CONFIG_FILE};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "l10ngen",
    author,
    version,
    about = "Generate Dart ARB and TypeScript localization files from CSV or Google Sheets",
    long_about = None
)]
struct Args {
    /// Configuration file used when no subcommand is given
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Log debug information to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import the configured source and write the localization files (default).
    Generate {
        /// Configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,
    },

    /// Check the Google Sheets connection step by step.
    Diagnose {
        /// Configuration file
        #[arg(short, long, default_value = DEFAULT_DIAGNOSE_CONFIG_FILE)]
        config: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        None => generate::run(&args.config),
        Some(Commands::Generate { config }) => generate::run(&config),
        Some(Commands::Diagnose { config }) => diagnose::run(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
