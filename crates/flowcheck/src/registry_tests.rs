#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[test]
fn catalog_has_eighteen_cases_in_order() {
    let cases = catalog();
    assert_eq!(cases.len(), 18);
    for (position, case) in cases.iter().enumerate() {
        assert_eq!(case.id, position);
        assert_eq!(case.fixture, format!("{}.flow", position));
    }
}

#[rstest]
#[case(0, "path", "pwd")]
#[case(1, "doit", "ls | wc")]
#[case(7, "doit", "echo 'f o o' | cat")]
#[case(14, "doit", "mkdir a 2>&1")]
#[case(17, "doit", "cat output.txt | wc")]
fn catalog_entries(#[case] id: usize, #[case] action: &str, #[case] command: &str) {
    let cases = catalog();
    assert_eq!(cases[id].action, action);
    assert_eq!(cases[id].reference_command, command);
}

#[test]
fn only_mutating_commands_are_flagged() {
    let flagged: Vec<usize> = catalog()
        .into_iter()
        .filter(|c| c.side_effects)
        .map(|c| c.id)
        .collect();
    assert_eq!(flagged, vec![14, 15, 16]);
}

#[test]
fn fixture_path_joins_fixtures_dir() {
    let case = TestCase::new(3, "3.flow", ACTION_DOIT, "ls -l | ls");
    assert_eq!(
        case.fixture_path(Path::new("files")),
        PathBuf::from("files/3.flow")
    );
}

#[test]
fn listing_has_one_line_per_case() {
    let cases = catalog();
    let mut out = Vec::new();
    write_listing(&mut out, &cases).unwrap();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), cases.len());
    assert!(lines[0].contains("0.flow"));
    assert!(lines[0].contains("pwd"));
    assert!(lines[16].ends_with("(side effects)"));
    assert!(!lines[17].ends_with("(side effects)"));
}
