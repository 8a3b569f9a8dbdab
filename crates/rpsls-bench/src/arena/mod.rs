mod opponents;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{BenchmarkConfig, OpponentKind, ResolvedOutputs};
use crate::logging;
use opponents::OpponentBlueprint;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use rpsls_bot::engine::{EngineParams, ParamsError};
use rpsls_bot::policy::{AdaptivePolicy, Policy, PolicyContext, PolicyError};
use rpsls_core::game::match_state::MatchState;
use rpsls_core::game::summary::{MatchSummary, Side};
use rpsls_core::model::ruleset::{Outcome, Ruleset};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

const ENGINE_NAME: &str = "engine";
/// Mixed into the match seed so the opponent's stream differs from the engine's.
const OPPONENT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Plays the adaptive engine against every configured opponent.
pub struct ArenaRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    opponents: Vec<OpponentBlueprint>,
    params: EngineParams,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub opponents: usize,
    pub matches_played: usize,
    pub rounds_per_match: u32,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl ArenaRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let opponents = OpponentBlueprint::from_configs(&config.opponents)?;
        let params = config.engine.apply_to(EngineParams::from_env());
        params.validate()?;

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            opponents,
            params,
        })
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Play every match, streaming one JSONL row per match to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.matches.seed.unwrap_or(0));
        let mut analytics = AnalyticsCollector::new(&self.config);
        let mut rows_written = 0usize;

        for match_index in 0..self.config.matches.count {
            for opponent in &self.opponents {
                let match_seed = rng.next_u64();
                let outcome = self.play_match(opponent, match_index, match_seed)?;
                analytics.record_match(&outcome)?;
                write_match_row(&mut writer, &self.config.run_id, &outcome)?;
                rows_written += 1;
            }
        }

        writer.flush()?;

        let summary = analytics.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self
            .logging_enabled
            .then(|| logging::telemetry_path(&self.outputs));

        Ok(RunSummary {
            opponents: self.opponents.len(),
            matches_played: rows_written,
            rounds_per_match: self.config.matches.rounds,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }

    fn play_match(
        &self,
        opponent: &OpponentBlueprint,
        match_index: usize,
        match_seed: u64,
    ) -> Result<MatchOutcome, RunnerError> {
        let ruleset = self.config.matches.ruleset;
        let mut engine = AdaptivePolicy::with_seed(ENGINE_NAME, self.params, match_seed);
        let mut rival = opponent.spawn_policy(match_seed ^ OPPONENT_SEED_SALT)?;
        let mut state = MatchState::new(ruleset);
        let mut sources: BTreeMap<String, u32> = BTreeMap::new();
        let mut invalid_rounds = 0u32;

        for round in 0..self.config.matches.rounds {
            let ctx = PolicyContext { ruleset, round };
            let engine_move = engine.choose(&ctx);
            let source = engine
                .last_decision()
                .map(|decision| decision.source.as_str())
                .unwrap_or("unknown");
            *sources.entry(source.to_string()).or_default() += 1;

            let opponent_move = rival.choose(&ctx);
            // The opponent is the first party; Win means the opponent took the round.
            let outcome = state.play_round(opponent_move, engine_move);
            if outcome == Outcome::Invalid {
                invalid_rounds += 1;
            }

            engine.observe(opponent_move);
            rival.observe(engine_move);

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "rpsls_bench::round",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    opponent = %opponent.name,
                    match_index = match_index as u32,
                    round,
                    engine = engine_move.as_str(),
                    opponent_move = opponent_move.as_str(),
                    source,
                    outcome = ?outcome,
                    decisive = outcome.is_decisive(),
                );
            }
        }

        Ok(MatchOutcome {
            opponent: opponent.name.clone(),
            kind: opponent.kind,
            match_index,
            match_seed,
            ruleset,
            summary: MatchSummary::capture(&state),
            decision_sources: sources,
            invalid_rounds,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_match_row(
    writer: &mut BufWriter<File>,
    run_id: &str,
    outcome: &MatchOutcome,
) -> Result<(), RunnerError> {
    let summary = &outcome.summary;
    let row = MatchLogRow {
        run_id,
        match_id: format!("M{:05}_{}", outcome.match_index, outcome.opponent),
        opponent: &outcome.opponent,
        kind: outcome.kind,
        match_index: outcome.match_index,
        match_seed: outcome.match_seed,
        ruleset: outcome.ruleset,
        winner: winner_label(summary.winner),
        engine_wins: outcome.engine_wins(),
        opponent_wins: outcome.opponent_wins(),
        draws: summary.draws,
        invalid_rounds: outcome.invalid_rounds,
        engine_win_rate: outcome.engine_win_rate(),
        decision_sources: &outcome.decision_sources,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn winner_label(winner: Option<Side>) -> &'static str {
    match winner {
        Some(Side::Computer) => "engine",
        Some(Side::Player) => "opponent",
        None => "tie",
    }
}

/// Result of a single engine-versus-opponent match.
pub struct MatchOutcome {
    pub opponent: String,
    pub kind: OpponentKind,
    pub match_index: usize,
    pub match_seed: u64,
    pub ruleset: Ruleset,
    /// Recorded with the opponent as player and the engine as computer.
    pub summary: MatchSummary,
    pub decision_sources: BTreeMap<String, u32>,
    pub invalid_rounds: u32,
}

impl MatchOutcome {
    pub fn engine_wins(&self) -> u32 {
        self.summary.computer_wins
    }

    pub fn opponent_wins(&self) -> u32 {
        self.summary.player_wins
    }

    /// Engine wins over decisive rounds.
    pub fn engine_win_rate(&self) -> Option<f64> {
        let decisive = self.engine_wins() + self.opponent_wins();
        (decisive > 0).then(|| f64::from(self.engine_wins()) / f64::from(decisive))
    }

    pub fn engine_won(&self) -> bool {
        self.summary.winner == Some(Side::Computer)
    }
}

#[derive(Serialize)]
struct MatchLogRow<'a> {
    run_id: &'a str,
    match_id: String,
    opponent: &'a str,
    kind: OpponentKind,
    match_index: usize,
    match_seed: u64,
    ruleset: Ruleset,
    winner: &'static str,
    engine_wins: u32,
    opponent_wins: u32,
    draws: u32,
    invalid_rounds: u32,
    engine_win_rate: Option<f64>,
    decision_sources: &'a BTreeMap<String, u32>,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Opponent(#[from] OpponentError),
    #[error("invalid engine parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

#[derive(Debug, Error)]
pub enum OpponentError {
    #[error("invalid parameter for opponent '{name}': {message}")]
    InvalidParam { name: String, message: String },
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
