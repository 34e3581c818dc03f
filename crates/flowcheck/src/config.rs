// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration loaded from `flowcheck.toml`.
//!
//! Every field has a default matching the conventional layout: `flow.cpp`
//! and the `files/` fixtures next to where the harness is started. Command
//! line flags override values read from the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "flowcheck.toml";

/// Default interpreter source file
pub const DEFAULT_SOURCE: &str = "flow.cpp";
/// Default path of the built interpreter
pub const DEFAULT_BINARY: &str = "flow";
/// Default fixtures directory
pub const DEFAULT_FIXTURES_DIR: &str = "files";
pub const DEFAULT_COMPILER: &str = "g++";
pub const DEFAULT_STD_FLAG: &str = "-std=c++11";
/// Shell used to evaluate reference commands
pub const DEFAULT_SHELL: &str = "sh";
/// Prefix of the result file name
pub const DEFAULT_RESULT_PREFIX: &str = "TestResult";

fn default_source() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE)
}

fn default_binary() -> PathBuf {
    PathBuf::from(DEFAULT_BINARY)
}

fn default_fixtures_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FIXTURES_DIR)
}

fn default_compiler() -> String {
    DEFAULT_COMPILER.to_string()
}

fn default_std_flag() -> String {
    DEFAULT_STD_FLAG.to_string()
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_result_prefix() -> String {
    DEFAULT_RESULT_PREFIX.to_string()
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Interpreter source, relative to the working directory
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Output path of the built interpreter
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// Directory holding the `.flow` fixtures
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,

    /// Compiler program
    #[serde(default = "default_compiler")]
    pub compiler: String,

    /// Language-standard flag passed to the compiler
    #[serde(default = "default_std_flag")]
    pub std_flag: String,

    /// Shell that evaluates reference commands via `-c`
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Directory every process runs in
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Where the result file is written (default: the working directory)
    #[serde(default)]
    pub results_dir: Option<PathBuf>,

    #[serde(default = "default_result_prefix")]
    pub result_prefix: String,

    /// Per-process wait limit. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            binary: default_binary(),
            fixtures_dir: default_fixtures_dir(),
            compiler: default_compiler(),
            std_flag: default_std_flag(),
            shell: default_shell(),
            working_dir: default_working_dir(),
            results_dir: None,
            result_prefix: default_result_prefix(),
            timeout_ms: None,
        }
    }
}

impl HarnessConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse(message) => ConfigError::Invalid {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Load `flowcheck.toml` from `dir` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve a configured path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.resolve(&self.source)
    }

    pub fn binary_path(&self) -> PathBuf {
        self.resolve(&self.binary)
    }

    pub fn results_dir(&self) -> PathBuf {
        match self.results_dir {
            Some(ref dir) => self.resolve(dir),
            None => self.working_dir.clone(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Invalid config {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Invalid config: {0}")]
    Parse(String),
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
