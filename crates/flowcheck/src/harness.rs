// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drives a full run: claim the result file, build, then every case in
//! catalog order.

use std::io::Write;

use thiserror::Error;

use crate::build::{build_subject, require_source, BuildError};
use crate::config::HarnessConfig;
use crate::diagnostic::{print_error, print_verbose, print_warning};
use crate::exec::{Engine, ExecutionOutcome};
use crate::registry::TestCase;
use crate::report::{ReportError, Reporter, ResultFile, RunReport, RunSummary};
use crate::time::Clock;

/// Switches that do not belong in the config file.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    /// Reuse the existing binary instead of rebuilding it
    pub skip_build: bool,
    /// Print a diff after each failed test
    pub show_diff: bool,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunResult {
    /// Nothing was executed because the interpreter could not be built
    Skipped(BuildError),
    Completed {
        report: RunReport,
        summary: RunSummary,
    },
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Build the interpreter and run `cases` in order.
///
/// A missing source file is not an error: the run is skipped before any
/// process starts or any result file is created. The result file is
/// claimed before the build, so a run that cannot record its results
/// leaves the existing binary untouched. Failing to write the result file
/// or the console ends the run.
pub async fn run<W: Write>(
    config: &HarnessConfig,
    cases: &[TestCase],
    clock: &dyn Clock,
    options: RunOptions,
    console: &mut W,
) -> Result<RunResult, HarnessError> {
    if !options.skip_build {
        if let Err(e) = require_source(config) {
            writeln!(console, "{}", e).map_err(ReportError::Console)?;
            return Ok(RunResult::Skipped(e));
        }
    }

    let result_file = ResultFile::claim(&config.results_dir(), &config.result_prefix, clock).await?;
    print_verbose(format_args!("writing results to {}", result_file.path().display()));

    if !options.skip_build {
        match build_subject(config, console).await {
            Ok(outcome) => {
                print_verbose(format_args!(
                    "build finished (removed stale binary: {}, compiled: {})",
                    outcome.removed_stale,
                    outcome.compiled()
                ));
            }
            Err(e) => {
                release(result_file);
                if let BuildError::Console(_) = e {
                    return Err(e.into());
                }
                print_error(&e);
                return Ok(RunResult::Skipped(e));
            }
        }
    }

    let engine = Engine::from_config(config);
    let mut reporter = Reporter::new(result_file, &mut *console).with_diff(options.show_diff);

    for case in cases {
        let outcome = engine.execute(case).await;
        log_irregularities(case, &outcome);
        reporter.record(outcome)?;
    }

    let (report, summary) = reporter.finish()?;
    Ok(RunResult::Completed { report, summary })
}

fn release(result_file: ResultFile) {
    let path = result_file.path().to_path_buf();
    if let Err(e) = result_file.discard() {
        print_warning(format_args!("Failed to remove {}: {}", path.display(), e));
    }
}

fn log_irregularities(case: &TestCase, outcome: &ExecutionOutcome) {
    if !outcome.subject_status.is_clean_exit() {
        print_verbose(format_args!(
            "test {} subject {}",
            case.id, outcome.subject_status
        ));
    }
    if !outcome.reference_status.is_clean_exit() {
        print_verbose(format_args!(
            "test {} reference {}",
            case.id, outcome.reference_status
        ));
    }
    if case.side_effects {
        print_verbose(format_args!(
            "test {} reference command changes the working directory",
            case.id
        ));
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
