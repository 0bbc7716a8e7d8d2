use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const GOLD_RUN: &str = r#"
world:
  width: 8
  height: 8
  units:
    - { kind: townhall, x: 0, y: 0 }
    - { kind: peasant, x: 1, y: 1 }
  resources:
    - { kind: gold, x: 3, y: 0, amount: 500 }
goal:
  required_gold: 100
"#;

const NO_MINES: &str = r#"
world:
  width: 8
  height: 8
  units:
    - { kind: townhall, x: 0, y: 0 }
    - { kind: peasant, x: 1, y: 1 }
goal:
  required_gold: 100
"#;

fn harvest(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_harvest"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("binary runs")
}

#[test]
fn plan_writes_plan_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("gold.yaml"), GOLD_RUN).expect("scenario");

    let output = harvest(dir.path(), &["plan", "gold.yaml", "--out", "out/plan.txt"]);
    assert!(output.status.success(), "{output:?}");

    let text = fs::read_to_string(dir.path().join("out/plan.txt")).expect("plan file");
    assert_eq!(text.lines().count(), 4);
    assert_eq!(text.lines().last(), Some("Parallel(Deposit(1, Gold, West))"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4 ticks, cost 4"), "{stdout}");
}

#[test]
fn plan_defaults_to_saves_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("gold.yaml"), GOLD_RUN).expect("scenario");

    let output = harvest(dir.path(), &["plan", "gold.yaml"]);
    assert!(output.status.success(), "{output:?}");
    assert!(dir.path().join("saves/plan.txt").is_file());
}

#[test]
fn expansion_budget_from_command_line_fails_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("gold.yaml"), GOLD_RUN).expect("scenario");

    let output = harvest(dir.path(), &["plan", "gold.yaml", "--max-expansions", "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expansion limit"), "{stderr}");
}

#[test]
fn check_reports_unreachable_goal() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("ok.yaml"), GOLD_RUN).expect("scenario");
    fs::write(dir.path().join("bad.yaml"), NO_MINES).expect("scenario");

    let ok = harvest(dir.path(), &["check", "ok.yaml"]);
    assert!(ok.status.success(), "{ok:?}");
    assert!(String::from_utf8_lossy(&ok.stdout).contains("Scenario OK"));

    let bad = harvest(dir.path(), &["check", "bad.yaml"]);
    assert!(!bad.status.success());
    let stderr = String::from_utf8_lossy(&bad.stderr);
    assert!(stderr.contains("no Gold nodes"), "{stderr}");
}
