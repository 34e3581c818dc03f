// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::HarnessConfig;
use crate::harness::RunOptions;

/// Differential test harness for the flow interpreter
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "flowcheck", version, about = "Compare a flow interpreter against the system shell")]
pub struct Cli {
    /// Config file (default: flowcheck.toml in the working directory, if present)
    #[arg(long, env = "FLOWCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interpreter source file
    #[arg(long, env = "FLOWCHECK_SOURCE")]
    pub source: Option<PathBuf>,

    /// Path of the built interpreter
    #[arg(long, env = "FLOWCHECK_BINARY")]
    pub binary: Option<PathBuf>,

    /// Directory holding the .flow fixtures
    #[arg(long, env = "FLOWCHECK_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Compiler used to build the interpreter
    #[arg(long, env = "FLOWCHECK_COMPILER")]
    pub compiler: Option<String>,

    /// Language-standard flag passed to the compiler
    #[arg(long, env = "FLOWCHECK_STD_FLAG", allow_hyphen_values = true)]
    pub std_flag: Option<String>,

    /// Shell that runs the reference commands
    #[arg(long, env = "FLOWCHECK_SHELL")]
    pub shell: Option<String>,

    /// Directory the interpreter and reference commands run in
    #[arg(long = "workdir", env = "FLOWCHECK_WORKDIR")]
    pub working_dir: Option<PathBuf>,

    /// Directory for the result file
    #[arg(long, env = "FLOWCHECK_RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,

    /// Kill a process that runs longer than this (default: wait forever)
    #[arg(long, env = "FLOWCHECK_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Reuse the existing binary instead of rebuilding
    #[arg(long)]
    pub skip_build: bool,

    /// List the test catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Print a diff after each failed test
    #[arg(long)]
    pub diff: bool,

    /// Print process details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Overlay flags on top of a loaded config.
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(ref source) = self.source {
            config.source = source.clone();
        }
        if let Some(ref binary) = self.binary {
            config.binary = binary.clone();
        }
        if let Some(ref fixtures) = self.fixtures {
            config.fixtures_dir = fixtures.clone();
        }
        if let Some(ref compiler) = self.compiler {
            config.compiler = compiler.clone();
        }
        if let Some(ref std_flag) = self.std_flag {
            config.std_flag = std_flag.clone();
        }
        if let Some(ref shell) = self.shell {
            config.shell = shell.clone();
        }
        if let Some(ref dir) = self.working_dir {
            config.working_dir = dir.clone();
        }
        if let Some(ref dir) = self.results_dir {
            config.results_dir = Some(dir.clone());
        }
        if self.timeout_ms.is_some() {
            config.timeout_ms = self.timeout_ms;
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            skip_build: self.skip_build,
            show_diff: self.diff,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
