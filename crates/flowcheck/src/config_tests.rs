#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use tempfile::TempDir;

#[test]
fn defaults_match_conventional_layout() {
    let config = HarnessConfig::default();
    assert_eq!(config.source, PathBuf::from("flow.cpp"));
    assert_eq!(config.binary, PathBuf::from("flow"));
    assert_eq!(config.fixtures_dir, PathBuf::from("files"));
    assert_eq!(config.compiler, "g++");
    assert_eq!(config.std_flag, "-std=c++11");
    assert_eq!(config.shell, "sh");
    assert_eq!(config.result_prefix, "TestResult");
    assert!(config.timeout().is_none());
}

#[test]
fn empty_file_yields_defaults() {
    let config = HarnessConfig::from_toml("").unwrap();
    assert_eq!(config, HarnessConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = HarnessConfig::from_toml(
        r#"
        compiler = "clang++"
        std_flag = "-std=c++17"
        timeout_ms = 2500
        "#,
    )
    .unwrap();

    assert_eq!(config.compiler, "clang++");
    assert_eq!(config.std_flag, "-std=c++17");
    assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
    assert_eq!(config.source, PathBuf::from("flow.cpp"));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = HarnessConfig::from_toml("parallel = true").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn resolve_joins_relative_paths_only() {
    let config = HarnessConfig {
        working_dir: PathBuf::from("/work"),
        ..Default::default()
    };

    assert_eq!(config.source_path(), PathBuf::from("/work/flow.cpp"));
    assert_eq!(config.binary_path(), PathBuf::from("/work/flow"));
    assert_eq!(
        config.resolve(Path::new("/abs/flow.cpp")),
        PathBuf::from("/abs/flow.cpp")
    );
}

#[test]
fn results_dir_defaults_to_working_dir() {
    let mut config = HarnessConfig {
        working_dir: PathBuf::from("/work"),
        ..Default::default()
    };
    assert_eq!(config.results_dir(), PathBuf::from("/work"));

    config.results_dir = Some(PathBuf::from("reports"));
    assert_eq!(config.results_dir(), PathBuf::from("/work/reports"));
}

#[test]
fn discover_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = HarnessConfig::discover(dir.path()).unwrap();
    assert_eq!(config, HarnessConfig::default());
}

#[test]
fn discover_reads_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "binary = \"build/flow\"\n").unwrap();

    let config = HarnessConfig::discover(dir.path()).unwrap();
    assert_eq!(config.binary, PathBuf::from("build/flow"));
}

#[test]
fn load_reports_path_on_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "timeout_ms = \"soon\"\n").unwrap();

    let err = HarnessConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn load_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = HarnessConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
