// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Builds a fresh interpreter binary before a run.
//!
//! The previous binary is always removed first so a failed compile can
//! never leave a stale interpreter in place for the tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;

use crate::config::HarnessConfig;
use crate::diagnostic::{print_verbose, print_warning};

/// Compiler invocation: `<compiler> <std_flag> <source> -o <binary>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    pub compiler: String,
    pub std_flag: String,
}

impl Toolchain {
    pub fn new(compiler: impl Into<String>, std_flag: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            std_flag: std_flag.into(),
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.compiler.clone(), config.std_flag.clone())
    }

    /// Argument vector passed to the compiler.
    pub fn args(&self, source: &Path, binary: &Path) -> Vec<String> {
        vec![
            self.std_flag.clone(),
            source.display().to_string(),
            "-o".to_string(),
            binary.display().to_string(),
        ]
    }
}

/// What the build step did.
#[derive(Debug)]
pub struct BuildOutcome {
    /// A binary from an earlier run was deleted
    pub removed_stale: bool,
    /// Compiler exit status, `None` when it could not be started
    pub compiler_status: Option<ExitStatus>,
}

impl BuildOutcome {
    pub fn compiled(&self) -> bool {
        self.compiler_status.is_some_and(|s| s.success())
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{} file not found.", .path.display())]
    SourceMissing { path: PathBuf },

    #[error("Failed to remove existing binary {}: {source}", .path.display())]
    RemoveStale {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write build progress: {0}")]
    Console(#[source] std::io::Error),
}

/// Check for the source file without building anything.
pub fn require_source(config: &HarnessConfig) -> Result<(), BuildError> {
    if config.source_path().is_file() {
        Ok(())
    } else {
        Err(BuildError::SourceMissing {
            path: config.source.clone(),
        })
    }
}

/// Rebuild the interpreter, writing progress lines to `console`.
///
/// Compiler failures are reported as warnings only. A missing binary shows
/// up later as failing tests.
pub async fn build_subject<W: Write>(
    config: &HarnessConfig,
    console: &mut W,
) -> Result<BuildOutcome, BuildError> {
    require_source(config)?;
    writeln!(console, "{} file found.", config.source.display()).map_err(BuildError::Console)?;

    let binary = config.binary_path();
    let removed_stale = remove_stale_binary(&binary)?;
    if removed_stale {
        writeln!(
            console,
            "Removed existing '{}' executable.",
            config.binary.display()
        )
        .map_err(BuildError::Console)?;
    }

    writeln!(console, "Compiling {}...", config.source.display()).map_err(BuildError::Console)?;
    let toolchain = Toolchain::from_config(config);
    let args = toolchain.args(&config.source, &config.binary);
    print_verbose(format_args!("{} {}", toolchain.compiler, args.join(" ")));

    let compiler_status = match Command::new(&toolchain.compiler)
        .args(&args)
        .current_dir(&config.working_dir)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
    {
        Ok(status) => {
            if !status.success() {
                print_warning(format_args!("{} exited with {}", toolchain.compiler, status));
            }
            Some(status)
        }
        Err(e) => {
            print_warning(format_args!("Failed to run {}: {}", toolchain.compiler, e));
            None
        }
    };
    writeln!(console, "Compiled.").map_err(BuildError::Console)?;

    Ok(BuildOutcome {
        removed_stale,
        compiler_status,
    })
}

fn remove_stale_binary(binary: &Path) -> Result<bool, BuildError> {
    if !binary.exists() {
        return Ok(false);
    }
    std::fs::remove_file(binary).map_err(|source| BuildError::RemoveStale {
        path: binary.to_path_buf(),
        source,
    })?;
    Ok(true)
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
