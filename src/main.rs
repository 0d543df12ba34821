//! cursor-id-reset: reset the telemetry IDs Cursor stores locally
//!
//! This tool is not affiliated with or endorsed by Anysphere, Inc. (Cursor).
//! It modifies locally stored data on your machine for personal use.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cursor_id_reset::config::Settings;

mod commands;

#[derive(Parser)]
#[command(name = "cursor-id-reset")]
#[command(about = "Reset Cursor IDE telemetry IDs", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to storage.json (defaults to Cursor's globalStorage/storage.json)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Process name to look for when closing Cursor
    #[arg(long, global = true)]
    process_name: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current telemetry IDs and their formats
    Show {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate new telemetry IDs (backs up storage.json first)
    Reset {
        /// Show the new IDs without writing them
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Close Cursor and start it again
    Restart,

    /// Close Cursor, reset IDs, then start Cursor again (recommended)
    Smart,

    /// Open the directory containing storage.json
    OpenDir,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli.storage, cli.process_name)?;
    tracing::debug!(?settings, "resolved settings");

    match cli.command {
        Commands::Show { json } => commands::show::execute(&settings, json)?,

        Commands::Reset { dry_run } => {
            if dry_run {
                println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
            }
            commands::reset::execute(&settings, dry_run)?;
        }

        Commands::Restart => commands::restart::execute(&settings)?,

        Commands::Smart => commands::smart::execute(&settings)?,

        Commands::OpenDir => commands::open_dir::execute(&settings)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
