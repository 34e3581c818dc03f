// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output comparison between the interpreter and the reference shell.

use similar::TextDiff;

/// Whether two captured outputs agree.
///
/// Leading and trailing whitespace is ignored. Everything else, including
/// internal whitespace and case, must match exactly.
pub fn outputs_match(subject: &str, reference: &str) -> bool {
    subject.trim() == reference.trim()
}

/// Unified line diff from the reference output to the subject output.
pub fn line_diff(reference: &str, subject: &str) -> String {
    TextDiff::from_lines(reference.trim(), subject.trim())
        .unified_diff()
        .context_radius(3)
        .header("reference", "subject")
        .to_string()
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;
