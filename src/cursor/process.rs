//! Finding, stopping and relaunching Cursor processes

use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use sysinfo::{Pid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A running process that matched the requested name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMatch {
    pub pid: u32,
    pub name: String,
    pub exe: PathBuf,
}

/// Result of scanning for a process by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessScan {
    Found(ProcessMatch),
    NotFound,
    /// A process matched but its executable path could not be read
    AccessDenied { pid: u32 },
}

/// Result of terminating a process tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateOutcome {
    Terminated,
    AlreadyGone,
    AccessDenied,
    /// Still alive when the timeout expired
    TimedOut,
}

/// Result of starting Cursor again
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelaunchOutcome {
    Started { pid: u32 },
    /// The executable is gone; the user has to start Cursor themselves
    ManualRestartRequired,
    SpawnFailed(String),
}

/// Process operations needed to restart Cursor
pub trait ProcessControl {
    /// Find a running process by name, preferring the root of a process tree
    fn find_by_executable_name(&mut self, name: &str) -> ProcessScan;

    /// Kill `pid` and its descendants, waiting up to `timeout` for them to exit
    fn terminate(&mut self, pid: u32, timeout: Duration) -> TerminateOutcome;

    /// Kill every process matching `name`, returning how many were signalled
    fn kill_all_matching(&mut self, name: &str, timeout: Duration) -> usize;

    /// Start the executable at `path` if it still exists
    fn relaunch(&mut self, path: &Path) -> RelaunchOutcome;
}

/// Whether a process name or executable file name matches `wanted`
///
/// Comparison ignores ASCII case and a trailing `.exe`, so `cursor` matches
/// `Cursor.exe`.
pub fn name_matches(process_name: &OsStr, exe: Option<&Path>, wanted: &str) -> bool {
    let wanted = strip_exe(wanted);
    let same = |candidate: &OsStr| {
        strip_exe(&candidate.to_string_lossy()).eq_ignore_ascii_case(wanted)
    };

    same(process_name) || exe.and_then(Path::file_name).is_some_and(same)
}

fn strip_exe(name: &str) -> &str {
    let Some(split) = name.len().checked_sub(4).filter(|&i| i > 0) else {
        return name;
    };
    match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".exe") => &name[..split],
        _ => name,
    }
}

/// [`ProcessControl`] backed by the live process table
pub struct SystemProcesses {
    system: System,
}

impl SystemProcesses {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    fn refresh(&mut self, which: ProcessesToUpdate<'_>) {
        self.system.refresh_processes_specifics(
            which,
            true,
            ProcessRefreshKind::nothing().with_exe(UpdateKind::OnlyIfNotSet),
        );
    }

    fn matching_pids(&self, name: &str) -> Vec<Pid> {
        let mut pids: Vec<Pid> = self
            .system
            .processes()
            .iter()
            .filter(|(_, p)| is_alive(p) && name_matches(p.name(), p.exe(), name))
            .map(|(pid, _)| *pid)
            .collect();
        pids.sort();
        pids
    }

    /// `pid` and all its descendants, deepest first
    fn tree_bottom_up(&self, pid: Pid) -> Vec<Pid> {
        let mut children: HashMap<Pid, Vec<Pid>> = HashMap::new();
        for (child, process) in self.system.processes() {
            if let Some(parent) = process.parent() {
                children.entry(parent).or_default().push(*child);
            }
        }

        let mut order = vec![pid];
        let mut seen = HashSet::from([pid]);
        let mut i = 0;
        while i < order.len() {
            if let Some(kids) = children.get(&order[i]) {
                for kid in kids {
                    if seen.insert(*kid) {
                        order.push(*kid);
                    }
                }
            }
            i += 1;
        }
        order.reverse();
        order
    }

    /// Poll until none of `pids` is alive; true if they all exited in time
    fn wait_for_exit(&mut self, pids: &[Pid], timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.refresh(ProcessesToUpdate::Some(pids));
            let alive = pids
                .iter()
                .filter(|pid| self.system.process(**pid).is_some_and(is_alive))
                .count();
            if alive == 0 {
                return true;
            }
            if Instant::now() >= deadline {
                debug!(alive, "processes still running after timeout");
                return false;
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Send kill to each pid
    ///
    /// Returns the pids that were signalled and whether any live process
    /// refused the signal.
    fn kill_each(&self, pids: &[Pid]) -> (Vec<Pid>, bool) {
        let mut signalled = Vec::new();
        let mut denied = false;
        for pid in pids {
            let Some(process) = self.system.process(*pid) else {
                continue;
            };
            if process.kill() {
                signalled.push(*pid);
            } else if is_alive(process) {
                warn!(%pid, "could not kill process");
                denied = true;
            }
        }
        (signalled, denied)
    }
}

impl Default for SystemProcesses {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessControl for SystemProcesses {
    fn find_by_executable_name(&mut self, name: &str) -> ProcessScan {
        self.refresh(ProcessesToUpdate::All);

        let pids = self.matching_pids(name);
        let matched: HashSet<Pid> = pids.iter().copied().collect();

        // A match whose parent is not itself a match is the tree root
        let root = pids
            .iter()
            .find(|pid| {
                self.system
                    .process(**pid)
                    .and_then(|p| p.parent())
                    .map_or(true, |parent| !matched.contains(&parent))
            })
            .or_else(|| pids.first());

        let Some(pid) = root.copied() else {
            return ProcessScan::NotFound;
        };
        let Some(process) = self.system.process(pid) else {
            return ProcessScan::NotFound;
        };

        debug!(%pid, matches = pids.len(), "found running process");
        match process.exe() {
            Some(exe) => ProcessScan::Found(ProcessMatch {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                exe: exe.to_path_buf(),
            }),
            None => ProcessScan::AccessDenied { pid: pid.as_u32() },
        }
    }

    fn terminate(&mut self, pid: u32, timeout: Duration) -> TerminateOutcome {
        let pid = Pid::from_u32(pid);
        self.refresh(ProcessesToUpdate::All);

        if !self.system.process(pid).is_some_and(is_alive) {
            return TerminateOutcome::AlreadyGone;
        }

        let tree = self.tree_bottom_up(pid);
        debug!(%pid, processes = tree.len(), "terminating process tree");
        let (signalled, denied) = self.kill_each(&tree);

        if signalled.is_empty() {
            return if denied {
                TerminateOutcome::AccessDenied
            } else {
                TerminateOutcome::AlreadyGone
            };
        }

        if self.wait_for_exit(&signalled, timeout) {
            TerminateOutcome::Terminated
        } else {
            TerminateOutcome::TimedOut
        }
    }

    fn kill_all_matching(&mut self, name: &str, timeout: Duration) -> usize {
        self.refresh(ProcessesToUpdate::All);
        let pids = self.matching_pids(name);
        if pids.is_empty() {
            return 0;
        }

        let (signalled, _) = self.kill_each(&pids);
        if !signalled.is_empty() && !self.wait_for_exit(&signalled, timeout) {
            warn!(name, "some processes survived the kill");
        }
        signalled.len()
    }

    fn relaunch(&mut self, path: &Path) -> RelaunchOutcome {
        if !path.exists() {
            return RelaunchOutcome::ManualRestartRequired;
        }

        match Command::new(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                debug!(pid = child.id(), path = %path.display(), "launched");
                RelaunchOutcome::Started { pid: child.id() }
            }
            Err(e) => RelaunchOutcome::SpawnFailed(e.to_string()),
        }
    }
}

/// Zombies have exited and only await reaping
fn is_alive(process: &sysinfo::Process) -> bool {
    !matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_case_insensitive() {
        assert!(name_matches(OsStr::new("Cursor.exe"), None, "cursor.exe"));
        assert!(name_matches(OsStr::new("CURSOR"), None, "cursor"));
        assert!(!name_matches(OsStr::new("cursor-helper"), None, "cursor"));
    }

    #[test]
    fn test_name_matches_ignores_exe_suffix() {
        assert!(name_matches(OsStr::new("Cursor.exe"), None, "Cursor"));
        assert!(name_matches(OsStr::new("cursor"), None, "Cursor.exe"));
        assert!(!name_matches(OsStr::new(".exe"), None, "cursor"));
    }

    #[test]
    fn test_name_matches_executable_file_name() {
        // Linux truncates process names, the exe path is the fallback
        let exe = Path::new("/opt/Cursor/cursor");
        assert!(name_matches(OsStr::new("electron"), Some(exe), "cursor"));
        let other = Path::new("/usr/bin/code");
        assert!(!name_matches(OsStr::new("electron"), Some(other), "cursor"));
    }

    #[test]
    fn test_find_nonexistent_process() {
        let mut procs = SystemProcesses::new();
        assert_eq!(
            procs.find_by_executable_name("no-such-process-name-4f0e1d6c"),
            ProcessScan::NotFound
        );
        assert_eq!(
            procs.kill_all_matching("no-such-process-name-4f0e1d6c", Duration::from_millis(10)),
            0
        );
    }

    #[test]
    fn test_relaunch_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut procs = SystemProcesses::new();
        assert_eq!(
            procs.relaunch(&dir.path().join("Cursor")),
            RelaunchOutcome::ManualRestartRequired
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_terminate_child_process() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();

        let mut procs = SystemProcesses::new();
        let outcome = procs.terminate(pid, Duration::from_secs(3));
        assert_eq!(outcome, TerminateOutcome::Terminated);

        child.wait().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_terminate_kills_descendants() {
        use std::io::{BufRead, BufReader};

        let mut child = Command::new("sh")
            .args(["-c", "sleep 30 & echo $!; wait"])
            .stdout(Stdio::piped())
            .spawn()
            .unwrap();
        let mut line = String::new();
        BufReader::new(child.stdout.take().unwrap())
            .read_line(&mut line)
            .unwrap();
        let grandchild = Pid::from_u32(line.trim().parse().unwrap());

        let mut procs = SystemProcesses::new();
        assert_eq!(
            procs.terminate(child.id(), Duration::from_secs(3)),
            TerminateOutcome::Terminated
        );

        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[grandchild]), true);
        assert!(!system.process(grandchild).is_some_and(is_alive));

        child.wait().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_kill_all_matching_live_process() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        // Short enough to survive the 15 byte comm limit
        let name = format!("idr{}", std::process::id());
        let script = dir.path().join(&name);
        std::fs::write(&script, "#!/bin/sh\nwhile true; do sleep 1; done\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        // Another test forking at the same moment can briefly hold the write handle
        let mut attempts = 0;
        let mut child = loop {
            match Command::new(&script).stdout(Stdio::null()).spawn() {
                Ok(child) => break child,
                Err(e) if e.raw_os_error() == Some(26) && attempts < 10 => {
                    attempts += 1;
                    thread::sleep(Duration::from_millis(50));
                }
                Err(e) => panic!("failed to start {}: {}", script.display(), e),
            }
        };

        let mut procs = SystemProcesses::new();
        assert_eq!(procs.kill_all_matching(&name, Duration::from_secs(3)), 1);
        assert_eq!(procs.kill_all_matching(&name, Duration::from_millis(10)), 0);

        child.wait().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_terminate_unknown_pid() {
        let mut procs = SystemProcesses::new();
        // Above the largest possible Linux pid_max
        assert_eq!(
            procs.terminate(99_999_999, Duration::from_millis(10)),
            TerminateOutcome::AlreadyGone
        );
    }
}
