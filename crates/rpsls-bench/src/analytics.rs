use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use rpsls_core::model::ruleset::Ruleset;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::arena::MatchOutcome;
use crate::config::{BenchmarkConfig, OpponentKind};

const CONFIDENCE_Z: f64 = 1.96; // 95% CI
const EVEN_SHARE: f64 = 0.5;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("opponent '{0}' present in results but missing from configuration")]
    UnknownOpponent(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Aggregates match outcomes per opponent, in configuration order.
pub struct AnalyticsCollector {
    run_id: String,
    ruleset: Ruleset,
    rounds_per_match: u32,
    opponents: HashMap<String, OpponentAccumulator>,
    order: Vec<String>,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let mut opponents = HashMap::new();
        let mut order = Vec::new();
        for opponent in &config.opponents {
            opponents.insert(
                opponent.name.clone(),
                OpponentAccumulator::new(opponent.name.clone(), opponent.kind),
            );
            order.push(opponent.name.clone());
        }

        Self {
            run_id: config.run_id.clone(),
            ruleset: config.matches.ruleset,
            rounds_per_match: config.matches.rounds,
            opponents,
            order,
        }
    }

    pub fn record_match(&mut self, outcome: &MatchOutcome) -> Result<(), AnalyticsError> {
        let acc = self
            .opponents
            .get_mut(&outcome.opponent)
            .ok_or_else(|| AnalyticsError::UnknownOpponent(outcome.opponent.clone()))?;
        acc.record(outcome);
        Ok(())
    }

    pub fn finalize(mut self) -> AnalyticsSummary {
        let reports = self
            .order
            .iter()
            .filter_map(|name| self.opponents.remove(name))
            .map(OpponentAccumulator::into_report)
            .collect();

        AnalyticsSummary {
            run_id: self.run_id,
            ruleset: self.ruleset,
            rounds_per_match: self.rounds_per_match,
            opponents: reports,
        }
    }
}

struct OpponentAccumulator {
    name: String,
    kind: OpponentKind,
    matches: u32,
    engine_match_wins: u32,
    opponent_match_wins: u32,
    engine_rounds: u64,
    opponent_rounds: u64,
    draws: u64,
    invalid_rounds: u64,
    per_match_share: Vec<f64>,
    sources: BTreeMap<String, u64>,
}

impl OpponentAccumulator {
    fn new(name: String, kind: OpponentKind) -> Self {
        Self {
            name,
            kind,
            matches: 0,
            engine_match_wins: 0,
            opponent_match_wins: 0,
            engine_rounds: 0,
            opponent_rounds: 0,
            draws: 0,
            invalid_rounds: 0,
            per_match_share: Vec::new(),
            sources: BTreeMap::new(),
        }
    }

    fn record(&mut self, outcome: &MatchOutcome) {
        self.matches += 1;
        if outcome.engine_won() {
            self.engine_match_wins += 1;
        } else if outcome.summary.winner.is_some() {
            self.opponent_match_wins += 1;
        }

        self.engine_rounds += u64::from(outcome.engine_wins());
        self.opponent_rounds += u64::from(outcome.opponent_wins());
        self.draws += u64::from(outcome.summary.draws);
        self.invalid_rounds += u64::from(outcome.invalid_rounds);

        // Matches without a decisive round carry no share.
        if let Some(share) = outcome.engine_win_rate() {
            self.per_match_share.push(share);
        }
        for (source, count) in &outcome.decision_sources {
            *self.sources.entry(source.clone()).or_default() += u64::from(*count);
        }
    }

    fn into_report(self) -> OpponentReport {
        let decisive = self.engine_rounds + self.opponent_rounds;
        let win_share = if decisive == 0 {
            0.0
        } else {
            self.engine_rounds as f64 / decisive as f64
        };

        OpponentReport {
            name: self.name,
            kind: self.kind,
            matches: self.matches,
            engine_match_wins: self.engine_match_wins,
            opponent_match_wins: self.opponent_match_wins,
            ties: self.matches - self.engine_match_wins - self.opponent_match_wins,
            engine_rounds: self.engine_rounds,
            opponent_rounds: self.opponent_rounds,
            draws: self.draws,
            invalid_rounds: self.invalid_rounds,
            win_share,
            ci95: confidence_interval(&self.per_match_share),
            p_value: even_share_p_value(self.engine_rounds, decisive),
            decision_sources: self.sources,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub ruleset: Ruleset,
    pub rounds_per_match: u32,
    pub opponents: Vec<OpponentReport>,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str(&format!("# Arena Summary: {}\n\n", self.run_id));
        rows.push_str(&format!(
            "Ruleset: {}, {} rounds per match\n\n",
            self.ruleset, self.rounds_per_match
        ));
        rows.push_str("| Opponent | Kind | Matches | Engine W-L-T | Round W-L-D | Invalid | Win share | 95% CI | p-value | Top source |\n");
        rows.push_str("|----------|------|---------|--------------|-------------|---------|-----------|--------|---------|------------|\n");

        for report in &self.opponents {
            rows.push_str(&format!(
                "| {name} | {kind:?} | {matches} | {mw}-{ml}-{mt} | {rw}-{rl}-{rd} | {invalid} | {share:.1}% | [{low:.3}, {high:.3}] | {pval:.3} | {source} |\n",
                name = report.name,
                kind = report.kind,
                matches = report.matches,
                mw = report.engine_match_wins,
                ml = report.opponent_match_wins,
                mt = report.ties,
                rw = report.engine_rounds,
                rl = report.opponent_rounds,
                rd = report.draws,
                invalid = report.invalid_rounds,
                share = report.win_share * 100.0,
                low = report.ci95.0,
                high = report.ci95.1,
                pval = report.p_value,
                source = report.dominant_source().unwrap_or("-"),
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpponentReport {
    pub name: String,
    pub kind: OpponentKind,
    pub matches: u32,
    pub engine_match_wins: u32,
    pub opponent_match_wins: u32,
    pub ties: u32,
    pub engine_rounds: u64,
    pub opponent_rounds: u64,
    pub draws: u64,
    pub invalid_rounds: u64,
    /// Engine wins over decisive rounds, pooled across matches.
    pub win_share: f64,
    /// Interval over per-match win shares.
    pub ci95: (f64, f64),
    /// Two-sided test of the pooled win share against an even split.
    pub p_value: f64,
    pub decision_sources: BTreeMap<String, u64>,
}

impl OpponentReport {
    /// Decision source that produced the most engine moves; ties go to the
    /// alphabetically first name.
    pub fn dominant_source(&self) -> Option<&str> {
        self.decision_sources
            .iter()
            .fold(None, |best: Option<(&String, u64)>, (name, count)| match best {
                Some((_, top)) if top >= *count => best,
                _ => Some((name, *count)),
            })
            .map(|(name, _)| name.as_str())
    }
}

fn confidence_interval(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    if samples.len() == 1 {
        return (mean, mean);
    }
    let variance = samples
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (samples.len() as f64 - 1.0);
    let std_error = (variance / samples.len() as f64).sqrt();
    let margin = CONFIDENCE_Z * std_error;
    (mean - margin, mean + margin)
}

/// Normal approximation to the binomial test of `wins` out of `trials`.
fn even_share_p_value(wins: u64, trials: u64) -> f64 {
    if trials == 0 {
        return 1.0;
    }
    let n = trials as f64;
    let expected = n * EVEN_SHARE;
    let std_dev = (n * EVEN_SHARE * (1.0 - EVEN_SHARE)).sqrt();
    let z = (wins as f64 - expected).abs() / std_dev;
    let Ok(normal) = Normal::new(0.0, 1.0) else {
        return 1.0;
    };
    let p = 2.0 * (1.0 - normal.cdf(z));
    p.clamp(0.0, 1.0)
}
