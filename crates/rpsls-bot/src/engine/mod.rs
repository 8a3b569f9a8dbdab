//! Adaptive opponent engine.
//!
//! The engine profiles a single opponent's move stream and answers each round
//! with a move meant to beat the opponent's predicted next move:
//! - `strategy`: the ordered pattern detectors and their verdicts.
//! - `params`: warm-up threshold and probability gates.

mod params;
mod strategy;

pub use params::{EngineParams, ParamsError};
pub use strategy::{PATTERN_WINDOW, SHORT_WINDOW, Strategy, Verdict, double_counter};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpsls_core::model::history::MoveHistory;
use rpsls_core::model::moves::Move;

/// Which rule produced the engine's move for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionSource {
    Warmup,
    Strategy(Strategy),
    Fallback,
}

impl DecisionSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            DecisionSource::Warmup => "warmup",
            DecisionSource::Strategy(strategy) => strategy.as_str(),
            DecisionSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub chosen: Move,
    /// Predicted opponent move that `chosen` counters, if any.
    pub prediction: Option<Move>,
    pub source: DecisionSource,
}

#[derive(Debug, Clone)]
pub struct OpponentEngine<R = StdRng> {
    history: MoveHistory,
    params: EngineParams,
    rng: R,
}

impl OpponentEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(EngineParams::default(), StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_params_and_seed(EngineParams::default(), seed)
    }

    pub fn with_params_and_seed(params: EngineParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }
}

impl Default for OpponentEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> OpponentEngine<R> {
    pub fn with_rng(params: EngineParams, rng: R) -> Self {
        Self {
            history: MoveHistory::new(),
            params,
            rng,
        }
    }

    /// The engine's move for the current round. Leaves history untouched.
    pub fn select_move(&mut self) -> Move {
        self.decide().chosen
    }

    pub fn decide(&mut self) -> Decision {
        if self.history.rounds() < self.params.warmup_rounds {
            return self.random(DecisionSource::Warmup);
        }

        for strategy in Strategy::PRIORITY {
            match strategy.evaluate(&self.history, &self.params, &mut self.rng) {
                Verdict::Predict(predicted) => {
                    return Decision {
                        chosen: predicted.pick_counter(&mut self.rng),
                        prediction: Some(predicted),
                        source: DecisionSource::Strategy(strategy),
                    };
                }
                Verdict::Random => return self.random(DecisionSource::Strategy(strategy)),
                Verdict::Decline => {}
            }
        }

        self.random(DecisionSource::Fallback)
    }

    /// Records the move the opponent actually played; `None` is ignored.
    pub fn record_opponent_move(&mut self, mv: impl Into<Option<Move>>) {
        if let Some(mv) = mv.into() {
            self.history.record(mv);
        }
    }

    pub fn reset(&mut self) {
        self.history.reset();
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn rounds(&self) -> u32 {
        self.history.rounds()
    }

    fn random(&mut self, source: DecisionSource) -> Decision {
        Decision {
            chosen: Move::random(&mut self.rng),
            prediction: None,
            source,
        }
    }
}
