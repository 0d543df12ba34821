//! Restart command - Close Cursor and start it again

use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::thread;
use tracing::debug;

use super::utils;
use cursor_id_reset::config::Settings;
use cursor_id_reset::cursor::process::{
    ProcessControl, ProcessScan, RelaunchOutcome, SystemProcesses, TerminateOutcome,
};

/// What a restart did
#[derive(Debug, PartialEq, Eq)]
pub enum RestartReport {
    NotRunning,
    Restarted {
        terminated: TerminateOutcome,
        stragglers: usize,
        relaunch: RelaunchOutcome,
    },
}

/// Close the running Cursor, then start it from the same executable
pub fn run_restart<P: ProcessControl>(procs: &mut P, settings: &Settings) -> RestartReport {
    let (pid, exe) = match procs.find_by_executable_name(&settings.process_name) {
        ProcessScan::NotFound => return RestartReport::NotRunning,
        ProcessScan::Found(found) => {
            debug!(pid = found.pid, name = %found.name, "restarting");
            (found.pid, Some(found.exe))
        }
        ProcessScan::AccessDenied { pid } => (pid, None),
    };

    let terminated = procs.terminate(pid, settings.terminate_timeout);
    thread::sleep(settings.settle_delay);
    let stragglers = procs.kill_all_matching(&settings.process_name, settings.terminate_timeout);

    let exe: Option<PathBuf> = exe.or_else(|| settings.installed_executable());
    let relaunch = match exe {
        Some(path) => procs.relaunch(&path),
        None => RelaunchOutcome::ManualRestartRequired,
    };

    RestartReport::Restarted {
        terminated,
        stragglers,
        relaunch,
    }
}

/// Execute the restart command
pub fn execute(settings: &Settings) -> Result<()> {
    println!("Closing Cursor...");
    let mut procs = SystemProcesses::new();

    match run_restart(&mut procs, settings) {
        RestartReport::NotRunning => {
            println!("{}", "No running Cursor found".yellow());
        }
        RestartReport::Restarted {
            terminated,
            stragglers,
            relaunch,
        } => {
            println!("  {}", utils::describe_terminate(terminated));
            if stragglers > 0 {
                println!("  Killed {} leftover process(es)", stragglers);
            }
            match relaunch {
                RelaunchOutcome::Started { .. } => {
                    println!("{}", utils::describe_relaunch(&relaunch).green())
                }
                _ => bail!(utils::describe_relaunch(&relaunch)),
            }
        }
    }

    Ok(())
}
