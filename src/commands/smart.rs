//! Smart command - Close Cursor, reset IDs, start Cursor again
//!
//! The recommended way to reset: Cursor rewrites storage.json on exit, so
//! the IDs only stick if the IDE is closed while they change.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::thread;
use tracing::info;

use super::{reset, utils};
use cursor_id_reset::config::Settings;
use cursor_id_reset::cursor::process::{
    ProcessControl, ProcessScan, RelaunchOutcome, SystemProcesses, TerminateOutcome,
};
use cursor_id_reset::cursor::{reset_ids, ResetReport};
use cursor_id_reset::error::ResetError;

/// Everything the smart sequence did
#[derive(Debug)]
pub struct SmartReport {
    /// `None` when Cursor was not running
    pub terminated: Option<TerminateOutcome>,
    pub reset: Result<ResetReport, ResetError>,
    pub stragglers: usize,
    /// `None` when no Cursor executable could be located
    pub relaunch: Option<RelaunchOutcome>,
}

/// Locate, close, reset, sweep leftovers, relaunch
///
/// `progress` receives a short line before each phase.
pub fn run_smart<P: ProcessControl>(
    procs: &mut P,
    settings: &Settings,
    progress: &mut dyn FnMut(&str),
) -> SmartReport {
    progress("Checking Cursor status...");
    let (running, launch_path): (Option<(u32, String)>, Option<PathBuf>) =
        match procs.find_by_executable_name(&settings.process_name) {
            ProcessScan::Found(found) => (Some((found.pid, found.name)), Some(found.exe)),
            ProcessScan::AccessDenied { pid } => (
                Some((pid, settings.process_name.clone())),
                settings.installed_executable(),
            ),
            ProcessScan::NotFound => (None, settings.installed_executable()),
        };

    let terminated = running.map(|(pid, name)| {
        progress(&format!("Closing {} (pid {})...", name, pid));
        let outcome = procs.terminate(pid, settings.terminate_timeout);
        thread::sleep(settings.settle_delay);
        outcome
    });

    progress("Resetting IDs...");
    let reset = reset_ids(&settings.storage_path, false);

    let mut stragglers = 0;
    let relaunch = match launch_path.filter(|p| p.exists()) {
        Some(path) => {
            progress("Starting Cursor...");
            stragglers =
                procs.kill_all_matching(&settings.process_name, settings.terminate_timeout);
            Some(procs.relaunch(&path))
        }
        None => None,
    };

    info!(?terminated, stragglers, ?relaunch, ok = reset.is_ok(), "smart reset finished");

    SmartReport {
        terminated,
        reset,
        stragglers,
        relaunch,
    }
}

/// Execute the smart command
pub fn execute(settings: &Settings) -> Result<()> {
    let mut procs = SystemProcesses::new();
    let report = run_smart(&mut procs, settings, &mut |step: &str| println!("{}", step.dimmed()));

    if let Some(outcome) = report.terminated {
        println!("  {}", utils::describe_terminate(outcome));
    }
    if report.stragglers > 0 {
        println!("  Killed {} leftover process(es)", report.stragglers);
    }
    println!();

    if let Ok(reset_report) = &report.reset {
        reset::print_report(reset_report);
    }

    match &report.relaunch {
        Some(outcome @ RelaunchOutcome::Started { .. }) => {
            println!("{}", utils::describe_relaunch(outcome).green());
        }
        Some(outcome) => println!("{}", utils::describe_relaunch(outcome).yellow()),
        None => println!("{}", "Please start Cursor manually".yellow()),
    }

    report.reset.map(|_| ()).context("Reset failed")?;
    println!("{}", "Done".green());

    Ok(())
}
