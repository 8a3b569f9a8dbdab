use std::path::PathBuf;

use clap::Parser;

use rpsls_bench::arena::ArenaRunner;
use rpsls_bench::config::{BenchmarkConfig, ResolvedOutputs};
use rpsls_bench::logging::init_logging;
use rpsls_core::AppInfo;

/// Arena harness for the adaptive RPSLS engine.
#[derive(Debug, Parser)]
#[command(
    name = "rpsls-bench",
    author,
    version,
    about = "Deterministic arena for the adaptive Rock-Paper-Scissors-Lizard-Spock engine"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/arena.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of matches per opponent.
    #[arg(long, value_name = "COUNT")]
    matches: Option<usize>,

    /// Override the number of rounds per match.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<u32>,

    /// Override the master RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no matches are played).
    #[arg(long)]
    validate_only: bool,

    /// Log every engine decision at DEBUG regardless of config.
    #[arg(long)]
    log_decisions: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    println!("{} - {} {}", AppInfo::name(), AppInfo::codename(), AppInfo::version());
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(matches) = cli.matches {
        config.matches.count = matches;
    }

    if let Some(rounds) = cli.rounds {
        config.matches.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.matches.seed = Some(seed);
    }

    if cli.log_decisions {
        config.logging.decision_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let opponent_count = config.opponents.len();
    let run_id = config.run_id.clone();
    let matches = config.matches.count;
    let rounds = config.matches.rounds;
    let logging = config.logging.clone();

    println!(
        "Loaded configuration '{run_id}' with {opponent_count} opponent{} ({matches} matches × {rounds} rounds, {} ruleset)",
        if opponent_count == 1 { "" } else { "s" },
        config.matches.ruleset
    );

    let runner = ArenaRunner::new(config, outputs.clone())?;

    if cli.validate_only {
        println!("Validation-only mode: arena execution skipped.");
        return Ok(());
    }

    let _logging_guard = init_logging(&logging, &outputs)?;
    let summary = runner.run()?;
    println!(
        "Arena complete for '{run_id}': {} opponents × {} matches → {} rows at {}",
        summary.opponents,
        matches,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
