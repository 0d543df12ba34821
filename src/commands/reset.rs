//! Reset command - Regenerate telemetry IDs in storage.json

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::utils;
use cursor_id_reset::config::Settings;
use cursor_id_reset::cursor::process::{ProcessControl, ProcessScan, SystemProcesses};
use cursor_id_reset::cursor::{reset_ids, ResetReport};

/// Execute the reset command
pub fn execute(settings: &Settings, dry_run: bool) -> Result<()> {
    if !dry_run {
        let mut procs = SystemProcesses::new();
        if !matches!(
            procs.find_by_executable_name(&settings.process_name),
            ProcessScan::NotFound
        ) {
            println!(
                "{} Cursor is running and may overwrite storage.json when it exits. \
                 Use `smart` to close it first.",
                "Warning:".yellow()
            );
        }
    }

    let report = reset_ids(&settings.storage_path, dry_run).context("Reset failed")?;
    print_report(&report);

    Ok(())
}

/// Print the old/new table and where the backup went
pub fn print_report(report: &ResetReport) {
    println!("{}", utils::comparison_table(&report.old, &report.new));
    println!();

    match &report.backup_path {
        Some(backup) => {
            println!("{} {}", "Backup:".green(), backup.display());
            println!("{}", "IDs updated, backup created".green());
        }
        None => println!("{}", "(DRY-RUN) No changes made.".blue()),
    }
}
