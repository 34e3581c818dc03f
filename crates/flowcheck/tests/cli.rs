// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! End-to-end tests for the flowcheck binary.
//!
//! A shell script stands in for the compiler so no C++ toolchain is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

fn flowcheck() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_flowcheck"));
    for var in [
        "FLOWCHECK_CONFIG",
        "FLOWCHECK_SOURCE",
        "FLOWCHECK_BINARY",
        "FLOWCHECK_FIXTURES",
        "FLOWCHECK_COMPILER",
        "FLOWCHECK_STD_FLAG",
        "FLOWCHECK_SHELL",
        "FLOWCHECK_WORKDIR",
        "FLOWCHECK_RESULTS_DIR",
        "FLOWCHECK_TIMEOUT_MS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Compiler stand-in whose output binary prints `out <fixture> <action>`.
fn write_fake_compiler(dir: &Path) -> String {
    let path = dir.join("fake-cxx");
    std::fs::write(
        &path,
        "#!/bin/sh\nprintf '#!/bin/sh\\necho \"out $1 $2\"\\n' > \"$4\"\nchmod +x \"$4\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

fn result_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("TestResult_") && n.ends_with(".txt"))
        .collect()
}

#[test]
fn list_prints_catalog_without_running() {
    let dir = TempDir::new().unwrap();
    let output = flowcheck()
        .arg("--list")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 18);
    assert!(stdout.contains("echo 'f o o' | cat"));
    assert!(result_files(dir.path()).is_empty());
}

#[test]
fn missing_source_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    flowcheck()
        .arg("--workdir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::eq("flow.cpp file not found.\n"));

    assert!(result_files(dir.path()).is_empty());
}

#[test]
fn full_run_writes_one_result_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("flow.cpp"), "// interpreter").unwrap();
    let compiler = write_fake_compiler(dir.path());

    let output = flowcheck()
        .arg("--workdir")
        .arg(dir.path())
        .arg("--compiler")
        .arg(&compiler)
        .arg("--timeout-ms")
        .arg("10000")
        .output()
        .unwrap();

    // Failing tests do not change the exit status.
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let verdicts: Vec<&str> = stdout.lines().filter(|l| l.starts_with("Test ")).collect();
    assert_eq!(verdicts.len(), 18);
    for (id, line) in verdicts.iter().enumerate() {
        assert!(
            line.starts_with(&format!("Test {} ", id)),
            "out of order: {}",
            line
        );
    }
    assert!(stdout.contains("All tests completed. Results saved to TestResult_"));

    let files = result_files(dir.path());
    assert_eq!(files.len(), 1);
    let log = std::fs::read_to_string(dir.path().join(&files[0])).unwrap();
    assert!(log.contains("Test 0 : pwd\n------PROGRAM OUTPUT--------\nout files/0.flow path\n"));
    assert!(log.contains("Test 17 : cat output.txt | wc\n"));
}

#[test]
fn config_file_is_read_from_workdir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("flowcheck.toml"), "source = \"interp.cpp\"\n").unwrap();

    flowcheck()
        .arg("--workdir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::eq("interp.cpp file not found.\n"));
}

#[test]
fn invalid_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("flowcheck.toml"), "threads = 4\n").unwrap();

    flowcheck()
        .arg("--workdir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn environment_selects_results_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("flow.cpp"), "// interpreter").unwrap();
    let compiler = write_fake_compiler(dir.path());

    flowcheck()
        .arg("--workdir")
        .arg(dir.path())
        .env("FLOWCHECK_COMPILER", &compiler)
        .env("FLOWCHECK_RESULTS_DIR", "reports")
        .env("FLOWCHECK_TIMEOUT_MS", "10000")
        .assert()
        .success();

    assert!(result_files(dir.path()).is_empty());
    assert_eq!(result_files(&dir.path().join("reports")).len(), 1);
}
