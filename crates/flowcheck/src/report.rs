// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result file and console verdicts for a run.
//!
//! Each outcome is written to the result file as soon as it is recorded,
//! and a one-line verdict goes to the console in the same order. The
//! result file is named after the run's start time:
//! `TestResult_YYYYMMDD_HHMMSS.txt`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

use crate::compare::line_diff;
use crate::exec::ExecutionOutcome;
use crate::time::Clock;

/// Timestamp layout embedded in result file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const PROGRAM_OUTPUT_HEADER: &str = "------PROGRAM OUTPUT--------";
const ACTUAL_OUTPUT_HEADER: &str = "-------ACTUAL OUTPUT-------";
const RECORD_SEPARATOR: &str =
    "*************************************************************************";

/// Seconds tried before giving up on a free result file name.
const MAX_CLAIM_ATTEMPTS: u32 = 3;

/// File name for a run started at `started`.
pub fn result_file_name(prefix: &str, started: NaiveDateTime) -> String {
    format!("{}_{}.txt", prefix, started.format(TIMESTAMP_FORMAT))
}

/// All outcomes of one run, in the order they were recorded.
#[derive(Clone, Debug)]
pub struct RunReport {
    created_at: NaiveDateTime,
    outcomes: Vec<ExecutionOutcome>,
}

impl RunReport {
    pub fn new(created_at: NaiveDateTime) -> Self {
        Self {
            created_at,
            outcomes: Vec::new(),
        }
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn push(&mut self, outcome: ExecutionOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[ExecutionOutcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }
}

/// Totals printed at the end of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub result_file: PathBuf,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to create result file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write result file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write to console: {0}")]
    Console(#[source] io::Error),
}

/// An empty result file reserved for one run.
#[derive(Debug)]
pub struct ResultFile {
    file: File,
    path: PathBuf,
    created_at: NaiveDateTime,
}

impl ResultFile {
    /// Create the result file in `dir`, named from the clock's current time.
    ///
    /// A file left by another run in the same second is never overwritten:
    /// the claim waits for the next second and tries that name instead.
    pub async fn claim(dir: &Path, prefix: &str, clock: &dyn Clock) -> Result<Self, ReportError> {
        std::fs::create_dir_all(dir).map_err(|source| ReportError::Create {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut attempt = 1;
        loop {
            let created_at = clock.now();
            let path = dir.join(result_file_name(prefix, created_at));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    return Ok(Self {
                        file,
                        path,
                        created_at,
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && attempt < MAX_CLAIM_ATTEMPTS => {
                    attempt += 1;
                    clock.sleep(until_next_second(created_at)).await;
                }
                Err(source) => return Err(ReportError::Create { path, source }),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Give the name back when the run ends before any test executes.
    pub fn discard(self) -> io::Result<()> {
        drop(self.file);
        std::fs::remove_file(&self.path)
    }
}

fn until_next_second(time: NaiveDateTime) -> Duration {
    // Leap seconds report nanoseconds past 1e9
    let nanos = u64::from(time.nanosecond() % 1_000_000_000);
    Duration::from_nanos(1_000_000_000 - nanos)
}

/// Writes outcomes to a claimed result file and verdicts to the console.
///
/// The file is closed when the reporter is dropped, including when a run
/// stops early on an error.
pub struct Reporter<W: Write> {
    file: File,
    path: PathBuf,
    console: W,
    show_diff: bool,
    report: RunReport,
}

impl<W: Write> Reporter<W> {
    pub fn new(result_file: ResultFile, console: W) -> Self {
        let ResultFile {
            file,
            path,
            created_at,
        } = result_file;
        Self {
            file,
            path,
            console,
            show_diff: false,
            report: RunReport::new(created_at),
        }
    }

    /// Print a diff to the console after each failure verdict.
    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Append one outcome to the result file, then print its verdict.
    pub fn record(&mut self, outcome: ExecutionOutcome) -> Result<(), ReportError> {
        self.write_record(&outcome)
            .map_err(|source| ReportError::Write {
                path: self.path.clone(),
                source,
            })?;

        let verdict = if outcome.passed { "passed" } else { "failed" };
        let printed = writeln!(self.console, "Test {} {}.", outcome.id, verdict).and_then(|()| {
            if self.show_diff && !outcome.passed {
                let diff = line_diff(&outcome.reference_stdout, &outcome.subject_stdout);
                write!(self.console, "{}", diff)
            } else {
                Ok(())
            }
        });

        self.report.push(outcome);
        printed.map_err(ReportError::Console)
    }

    fn write_record(&mut self, outcome: &ExecutionOutcome) -> io::Result<()> {
        write!(
            self.file,
            "\nTest {} : {}\n{}\n{}\n{}\n{}\n{}\n",
            outcome.id,
            outcome.reference_command,
            PROGRAM_OUTPUT_HEADER,
            outcome.subject_stdout,
            ACTUAL_OUTPUT_HEADER,
            outcome.reference_stdout,
            RECORD_SEPARATOR,
        )?;
        self.file.flush()
    }

    /// Print the closing summary and release the result file.
    pub fn finish(mut self) -> Result<(RunReport, RunSummary), ReportError> {
        self.file.sync_all().map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;

        let summary = RunSummary {
            result_file: self.path.clone(),
            passed: self.report.passed(),
            failed: self.report.failed(),
        };
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        writeln!(
            self.console,
            "{} passed, {} failed.",
            summary.passed, summary.failed
        )
        .and_then(|()| {
            writeln!(
                self.console,
                "\nAll tests completed. Results saved to {}.\n",
                file_name
            )
        })
        .and_then(|()| self.console.flush())
        .map_err(ReportError::Console)?;

        Ok((self.report, summary))
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
