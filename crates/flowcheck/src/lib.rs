// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Differential test harness for the flow interpreter.
//!
//! Builds the interpreter from `flow.cpp`, runs every case of a fixed
//! catalog against it, and compares each result with the output of the
//! system shell running an equivalent command line. Verdicts are printed as
//! they arrive and the full outputs land in a timestamped result file.

pub mod build;
pub mod cli;
pub mod compare;
pub mod config;
pub mod diagnostic;
pub mod exec;
pub mod harness;
pub mod registry;
pub mod report;
pub mod time;
