use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const CONFIG: &str = r#"
run_id: "cli_check"
matches:
  seed: 1
  count: 2
  rounds: 25
opponents:
  - name: "noise"
    kind: "uniform"
outputs:
  jsonl: "{dir}/{run_id}/matches.jsonl"
  summary_md: "{dir}/{run_id}/summary.md"
"#;

fn write_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("arena.yaml");
    let yaml = CONFIG.replace("{dir}", &dir.display().to_string());
    fs::write(&path, yaml).expect("write config");
    path
}

#[test]
fn validate_only_skips_the_arena() {
    let dir = tempdir().expect("temp dir");
    let config = write_config(dir.path());

    Command::cargo_bin("rpsls-bench")
        .expect("binary built")
        .arg("--config")
        .arg(&config)
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation-only mode"));

    assert!(!dir.path().join("cli_check").exists());
}

#[test]
fn overrides_apply_before_running() {
    let dir = tempdir().expect("temp dir");
    let config = write_config(dir.path());

    Command::cargo_bin("rpsls-bench")
        .expect("binary built")
        .arg("--config")
        .arg(&config)
        .args(["--run-id", "override", "--matches", "3", "--rounds", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arena complete for 'override'"));

    let rows = fs::read_to_string(dir.path().join("override/matches.jsonl")).expect("jsonl");
    assert_eq!(rows.lines().count(), 3);
}

#[test]
fn rejects_invalid_config() {
    let dir = tempdir().expect("temp dir");
    let config = write_config(dir.path());

    Command::cargo_bin("rpsls-bench")
        .expect("binary built")
        .arg("--config")
        .arg(&config)
        .args(["--rounds", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("matches.rounds"));
}
