use std::fs;
use std::path::Path;

use rpsls_bench::arena::{ArenaRunner, RunSummary};
use rpsls_bench::config::BenchmarkConfig;
use sha2::{Digest, Sha256};
use tempfile::tempdir;

fn load_config(output_dir: &Path, seed: u64) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
matches:
  seed: {seed}
  count: 3
  rounds: 40
  ruleset: "extended"
opponents:
  - name: "rotator"
    kind: "scripted"
    params:
      sequence: [rock, paper, scissors]
  - name: "repeater"
    kind: "scripted"
    params:
      sequence: "rrrrp"
  - name: "noise"
    kind: "uniform"
  - name: "rocky"
    kind: "biased"
    params:
      weights: {{ rock: 6, paper: 1, spock: 1 }}
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("matches.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_arena(output_dir: &Path, seed: u64) -> RunSummary {
    let config = load_config(output_dir, seed);
    let outputs = config.resolved_outputs();
    let runner = ArenaRunner::new(config, outputs).expect("runner created");
    runner.run().expect("arena completes")
}

fn digest(path: &Path) -> String {
    let jsonl = fs::read_to_string(path).expect("jsonl readable");
    let mut hasher = Sha256::new();
    hasher.update(jsonl.as_bytes());
    hex::encode(hasher.finalize())
}

#[test]
fn arena_smoke_test_is_reproducible_under_seed() {
    let first_dir = tempdir().expect("temp dir");
    let second_dir = tempdir().expect("temp dir");
    let other_dir = tempdir().expect("temp dir");

    let first = run_arena(first_dir.path(), 4242);
    let second = run_arena(second_dir.path(), 4242);
    let other = run_arena(other_dir.path(), 4243);

    assert_eq!(first.opponents, 4);
    assert_eq!(first.rows_written, 12);
    assert_eq!(first.rounds_per_match, 40);

    assert_eq!(
        digest(&first.jsonl_path),
        digest(&second.jsonl_path),
        "identical seeds must produce identical JSONL output"
    );
    assert_ne!(digest(&first.jsonl_path), digest(&other.jsonl_path));

    let summary = fs::read_to_string(&first.summary_path).expect("summary markdown");
    for name in ["rotator", "repeater", "noise", "rocky"] {
        assert!(summary.contains(&format!("| {name} |")), "{name} missing");
    }
}

#[test]
fn rows_account_for_every_round() {
    let dir = tempdir().expect("temp dir");
    let summary = run_arena(dir.path(), 99);
    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");

    for line in jsonl.lines() {
        let row: serde_json::Value = serde_json::from_str(line).expect("row decodes to JSON");
        let tallied = ["engine_wins", "opponent_wins", "draws", "invalid_rounds"]
            .iter()
            .map(|key| row[*key].as_u64().expect("numeric tally"))
            .sum::<u64>();
        assert_eq!(tallied, 40, "row {row}");
        assert_eq!(row["ruleset"], "extended");
    }
}
