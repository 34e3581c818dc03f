// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runs the interpreter and the reference shell for one test case.
//!
//! Each process is awaited to completion before the next one starts.
//! Launch failures, non-zero exits and timeouts are recorded in
//! [`CaptureStatus`] but never abort the run: whatever reached stdout is
//! what gets compared.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::compare::outputs_match;
use crate::config::HarnessConfig;
use crate::registry::TestCase;

/// How a captured process ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureStatus {
    /// Exit code, `None` when terminated by a signal
    Exited(Option<i32>),
    LaunchFailed(String),
    TimedOut(Duration),
}

impl CaptureStatus {
    pub fn is_clean_exit(&self) -> bool {
        matches!(self, Self::Exited(Some(0)))
    }
}

impl fmt::Display for CaptureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(Some(code)) => write!(f, "exited with {}", code),
            Self::Exited(None) => write!(f, "terminated by signal"),
            Self::LaunchFailed(e) => write!(f, "failed to start: {}", e),
            Self::TimedOut(limit) => write!(f, "timed out after {}ms", limit.as_millis()),
        }
    }
}

/// Standard output of a finished process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    pub status: CaptureStatus,
}

impl Captured {
    fn launch_failed(e: std::io::Error) -> Self {
        Self {
            stdout: String::new(),
            status: CaptureStatus::LaunchFailed(e.to_string()),
        }
    }
}

/// Run `command` to completion and capture its stdout as text.
///
/// The process leads its own process group. With a `limit`, the whole group
/// is killed when it expires, so nothing a shell started outlives the case,
/// and the result is [`CaptureStatus::TimedOut`] with empty output. Without
/// one the wait is unbounded.
pub async fn run_to_completion(mut command: Command, limit: Option<Duration>) -> Captured {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .process_group(0)
        .kill_on_drop(true);

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => return Captured::launch_failed(e),
    };
    let group = child.id().map(|pid| Pid::from_raw(pid as i32));
    let mut stdout_pipe = child.stdout.take();

    let wait = async {
        let mut buf = Vec::new();
        if let Some(ref mut pipe) = stdout_pipe {
            pipe.read_to_end(&mut buf).await?;
        }
        let status = child.wait().await?;
        Ok::<_, std::io::Error>((buf, status))
    };

    let finished = match limit {
        Some(limit) => match tokio::time::timeout(limit, wait).await {
            Ok(result) => result,
            Err(_) => {
                if let Some(group) = group {
                    // ESRCH: the group already exited
                    let _ = killpg(group, Signal::SIGKILL);
                }
                return Captured {
                    stdout: String::new(),
                    status: CaptureStatus::TimedOut(limit),
                }
            }
        },
        None => wait.await,
    };

    match finished {
        Ok((buf, status)) => Captured {
            stdout: String::from_utf8_lossy(&buf).into_owned(),
            status: CaptureStatus::Exited(status.code()),
        },
        Err(e) => Captured::launch_failed(e),
    }
}

/// Process settings shared by every case in a run.
#[derive(Clone, Debug)]
pub struct Engine {
    pub binary: PathBuf,
    pub fixtures_dir: PathBuf,
    pub shell: String,
    pub working_dir: PathBuf,
    pub timeout: Option<Duration>,
}

impl Engine {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            binary: config.binary_path(),
            fixtures_dir: config.fixtures_dir.clone(),
            shell: config.shell.clone(),
            working_dir: config.working_dir.clone(),
            timeout: config.timeout(),
        }
    }

    /// Interpreter invocation: `<binary> <fixture> <action>`, no shell.
    pub fn subject_command(&self, case: &TestCase) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg(case.fixture_path(&self.fixtures_dir))
            .arg(&case.action)
            .current_dir(&self.working_dir);
        command
    }

    /// Reference invocation: `<shell> -c <reference_command>`.
    pub fn reference_command(&self, case: &TestCase) -> Command {
        shell_command(&self.shell, &case.reference_command, &self.working_dir)
    }

    /// Run both sides of a case, subject first.
    pub async fn execute(&self, case: &TestCase) -> ExecutionOutcome {
        let subject = run_to_completion(self.subject_command(case), self.timeout).await;
        let reference = run_to_completion(self.reference_command(case), self.timeout).await;
        ExecutionOutcome::new(case, subject, reference)
    }
}

fn shell_command(shell: &str, script: impl AsRef<OsStr>, dir: &Path) -> Command {
    let mut command = Command::new(shell);
    command.arg("-c").arg(script).current_dir(dir);
    command
}

/// Result of running one test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub id: usize,
    pub reference_command: String,
    pub subject_stdout: String,
    pub reference_stdout: String,
    pub subject_status: CaptureStatus,
    pub reference_status: CaptureStatus,
    pub passed: bool,
}

impl ExecutionOutcome {
    pub fn new(case: &TestCase, subject: Captured, reference: Captured) -> Self {
        let passed = outputs_match(&subject.stdout, &reference.stdout);
        Self {
            id: case.id,
            reference_command: case.reference_command.clone(),
            subject_stdout: subject.stdout,
            reference_stdout: reference.stdout,
            subject_status: subject.status,
            reference_status: reference.status,
            passed,
        }
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
