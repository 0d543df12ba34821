//! Scripted process table for command tests

use std::path::{Path, PathBuf};
use std::time::Duration;

use cursor_id_reset::config::Settings;
use cursor_id_reset::cursor::process::{
    ProcessControl, ProcessMatch, ProcessScan, RelaunchOutcome, TerminateOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Find,
    Terminate(u32),
    KillMatching,
    Relaunch(PathBuf),
}

/// Records every call and answers from fixed values
pub struct FakeProcesses {
    pub scan: ProcessScan,
    pub stragglers: usize,
    pub steps: Vec<Step>,
}

impl FakeProcesses {
    pub fn not_running() -> Self {
        Self {
            scan: ProcessScan::NotFound,
            stragglers: 0,
            steps: Vec::new(),
        }
    }

    pub fn running(exe: &Path) -> Self {
        Self {
            scan: ProcessScan::Found(ProcessMatch {
                pid: 7,
                name: "Cursor".to_string(),
                exe: exe.to_path_buf(),
            }),
            stragglers: 0,
            steps: Vec::new(),
        }
    }

    /// Settings rooted in `dir` with no delays and no install candidates
    pub fn settings(dir: &Path) -> Settings {
        Settings {
            storage_path: dir.join("storage.json"),
            process_name: "Cursor".to_string(),
            install_candidates: Vec::new(),
            terminate_timeout: Duration::ZERO,
            settle_delay: Duration::ZERO,
        }
    }
}

impl ProcessControl for FakeProcesses {
    fn find_by_executable_name(&mut self, _name: &str) -> ProcessScan {
        self.steps.push(Step::Find);
        self.scan.clone()
    }

    fn terminate(&mut self, pid: u32, _timeout: Duration) -> TerminateOutcome {
        self.steps.push(Step::Terminate(pid));
        TerminateOutcome::Terminated
    }

    fn kill_all_matching(&mut self, _name: &str, _timeout: Duration) -> usize {
        self.steps.push(Step::KillMatching);
        self.stragglers
    }

    fn relaunch(&mut self, path: &Path) -> RelaunchOutcome {
        self.steps.push(Step::Relaunch(path.to_path_buf()));
        if path.exists() {
            RelaunchOutcome::Started { pid: 99 }
        } else {
            RelaunchOutcome::ManualRestartRequired
        }
    }
}
