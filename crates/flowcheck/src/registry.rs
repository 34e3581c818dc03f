// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed catalog of flow test cases.
//!
//! Cases run and are reported in declaration order. A case's id is its
//! position in [`CATALOG`], so new scenarios go at the end.

use std::path::{Path, PathBuf};

/// Action token for a plain invocation of the interpreter.
pub const ACTION_PATH: &str = "path";
/// Action token asking the interpreter to execute the flow.
pub const ACTION_DOIT: &str = "doit";

/// Static definition of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaseSpec {
    pub fixture: &'static str,
    pub action: &'static str,
    pub reference_command: &'static str,
    /// Reference command mutates the working directory.
    pub side_effects: bool,
}

const fn case(fixture: &'static str, action: &'static str, command: &'static str) -> CaseSpec {
    CaseSpec {
        fixture,
        action,
        reference_command: command,
        side_effects: false,
    }
}

const fn mutating(fixture: &'static str, action: &'static str, command: &'static str) -> CaseSpec {
    CaseSpec {
        fixture,
        action,
        reference_command: command,
        side_effects: true,
    }
}

pub const CATALOG: &[CaseSpec] = &[
    case("0.flow", ACTION_PATH, "pwd"),
    case("1.flow", ACTION_DOIT, "ls | wc"),
    case("2.flow", ACTION_DOIT, "ls -l | wc"),
    case("3.flow", ACTION_DOIT, "ls -l | ls"),
    case("4.flow", ACTION_DOIT, "echo foo | cat"),
    case("5.flow", ACTION_DOIT, "echo 'foo' | cat"),
    case("6.flow", ACTION_DOIT, "echo \"foo\" | cat"),
    case("7.flow", ACTION_DOIT, "echo 'f o o' | cat"),
    case("8.flow", ACTION_DOIT, "ls ; pwd"),
    case("9.flow", ACTION_DOIT, "ls; ls ; ls -a"),
    case(
        "10.flow",
        ACTION_DOIT,
        "echo foo1 ; echo 'foo2' ; echo \"foo3\" ; echo 'f o o 4'",
    ),
    case("11.flow", ACTION_DOIT, "ls | wc ; pwd"),
    case(
        "12.flow",
        ACTION_DOIT,
        "( cat foo.txt ; cat foo.txt | sed s/o/u/g ) | wc",
    ),
    case(
        "13.flow",
        ACTION_DOIT,
        "( seq 1 5 | awk '{print $1*$1}'; seq 1 5 | awk '{print $1*2}'; seq 1 5 | awk '{print $1+5}' ) | sort -n | uniq",
    ),
    mutating("14.flow", ACTION_DOIT, "mkdir a 2>&1"),
    mutating("15.flow", ACTION_DOIT, "mkdir a 2>&1 | wc"),
    mutating("16.flow", ACTION_DOIT, "ls > output.txt"),
    case("17.flow", ACTION_DOIT, "cat output.txt | wc"),
];

/// A catalog entry bound to its ordinal id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    pub id: usize,
    pub fixture: String,
    pub action: String,
    pub reference_command: String,
    pub side_effects: bool,
}

impl TestCase {
    pub fn new(
        id: usize,
        fixture: impl Into<String>,
        action: impl Into<String>,
        reference_command: impl Into<String>,
    ) -> Self {
        Self {
            id,
            fixture: fixture.into(),
            action: action.into(),
            reference_command: reference_command.into(),
            side_effects: false,
        }
    }

    /// Mark the reference command as mutating the working directory.
    pub fn with_side_effects(mut self, side_effects: bool) -> Self {
        self.side_effects = side_effects;
        self
    }

    /// Location of the fixture under the given fixtures directory.
    pub fn fixture_path(&self, fixtures_dir: &Path) -> PathBuf {
        fixtures_dir.join(&self.fixture)
    }
}

impl From<(usize, &CaseSpec)> for TestCase {
    fn from((id, spec): (usize, &CaseSpec)) -> Self {
        TestCase::new(id, spec.fixture, spec.action, spec.reference_command)
            .with_side_effects(spec.side_effects)
    }
}

/// The catalog in execution order.
pub fn catalog() -> Vec<TestCase> {
    CATALOG.iter().enumerate().map(TestCase::from).collect()
}

/// Write the catalog as a listing, one case per line.
pub fn write_listing<W: std::io::Write>(writer: &mut W, cases: &[TestCase]) -> std::io::Result<()> {
    for case in cases {
        let marker = if case.side_effects { " (side effects)" } else { "" };
        writeln!(
            writer,
            "{:>3}  {:<8} {:<5} {}{}",
            case.id, case.fixture, case.action, case.reference_command, marker
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
