use super::params::EngineParams;
use rand::Rng;
use rand::seq::SliceRandom;
use rpsls_core::model::history::MoveHistory;
use rpsls_core::model::moves::Move;

/// Moves inspected by the alternation and restricted-set detectors.
pub const PATTERN_WINDOW: usize = 5;

/// Moves inspected by the repeat, rotation and reactive detectors.
pub const SHORT_WINDOW: usize = 3;

/// Rotation subset, in forward order.
const ROTATION: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

/// What a single strategy concluded about the next opponent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The opponent is expected to play this move; the engine counters it.
    Predict(Move),
    /// The strategy applies but its probability gate chose a random move.
    Random,
    /// The strategy does not apply to the current history.
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Alternation,
    RestrictedSet,
    ImmediateRepeat,
    Rotation,
    ReactiveResponse,
    Frequency,
}

impl Strategy {
    /// Evaluation order; the first strategy that does not decline wins.
    pub const PRIORITY: [Strategy; 6] = [
        Strategy::Alternation,
        Strategy::RestrictedSet,
        Strategy::ImmediateRepeat,
        Strategy::Rotation,
        Strategy::ReactiveResponse,
        Strategy::Frequency,
    ];

    pub const fn min_history(self) -> usize {
        match self {
            Strategy::Alternation | Strategy::RestrictedSet => PATTERN_WINDOW,
            Strategy::ImmediateRepeat | Strategy::Rotation | Strategy::ReactiveResponse => {
                SHORT_WINDOW
            }
            Strategy::Frequency => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Alternation => "alternation",
            Strategy::RestrictedSet => "restricted_set",
            Strategy::ImmediateRepeat => "immediate_repeat",
            Strategy::Rotation => "rotation",
            Strategy::ReactiveResponse => "reactive_response",
            Strategy::Frequency => "frequency",
        }
    }

    pub fn evaluate<R: Rng + ?Sized>(
        self,
        history: &MoveHistory,
        params: &EngineParams,
        rng: &mut R,
    ) -> Verdict {
        if history.len() < self.min_history() {
            return Verdict::Decline;
        }

        match self {
            Strategy::Alternation => alternation(history.last_n(PATTERN_WINDOW)),
            Strategy::RestrictedSet => restricted_set(
                history.last_n(PATTERN_WINDOW),
                params.restricted_max_distinct,
                rng,
            ),
            Strategy::ImmediateRepeat => {
                immediate_repeat(history.last_n(SHORT_WINDOW), params.repeat_probability, rng)
            }
            Strategy::Rotation => rotation(history.last_n(SHORT_WINDOW)),
            Strategy::ReactiveResponse => {
                if !params.reactive_enabled {
                    return Verdict::Decline;
                }
                history.last().map_or(Verdict::Decline, Verdict::Predict)
            }
            Strategy::Frequency => match history.most_frequent() {
                Some(mv) if rng.r#gen::<f64>() < params.frequency_probability => {
                    Verdict::Predict(mv)
                }
                Some(_) => Verdict::Random,
                None => Verdict::Decline,
            },
        }
    }
}

/// Counter of a counter: what an opponent who expects to be countered plays.
pub fn double_counter<R: Rng + ?Sized>(mv: Move, rng: &mut R) -> Move {
    mv.pick_counter(rng).pick_counter(rng)
}

fn alternation(window: &[Move]) -> Verdict {
    let [m0, m1, m2, m3, m4] = window else {
        return Verdict::Decline;
    };
    if m0 == m2 && m1 == m3 && m2 == m4 {
        Verdict::Predict(*m2)
    } else {
        Verdict::Decline
    }
}

fn restricted_set<R: Rng + ?Sized>(window: &[Move], max_distinct: usize, rng: &mut R) -> Verdict {
    let mut present = [false; Move::COUNT];
    for mv in window {
        present[mv.index()] = true;
    }
    let distinct = present.iter().filter(|seen| **seen).count();
    if distinct > max_distinct {
        return Verdict::Decline;
    }

    let absent: Vec<Move> = Move::ALL
        .iter()
        .copied()
        .filter(|mv| !present[mv.index()])
        .collect();
    absent
        .choose(rng)
        .map_or(Verdict::Decline, |mv| Verdict::Predict(*mv))
}

fn immediate_repeat<R: Rng + ?Sized>(window: &[Move], keep_probability: f64, rng: &mut R) -> Verdict {
    let [.., previous, last] = window else {
        return Verdict::Decline;
    };
    if previous != last {
        return Verdict::Decline;
    }
    if rng.r#gen::<f64>() < keep_probability {
        Verdict::Predict(*last)
    } else {
        Verdict::Predict(double_counter(*last, rng))
    }
}

fn rotation(window: &[Move]) -> Verdict {
    let [a, b, c] = window else {
        return Verdict::Decline;
    };
    if a == b || b == c || a == c {
        return Verdict::Decline;
    }
    let Some(start) = ROTATION.iter().position(|mv| mv == a) else {
        return Verdict::Decline;
    };

    let step = |offset: usize| ROTATION[(start + offset) % ROTATION.len()];
    if *b == step(1) && *c == step(2) {
        return Verdict::Predict(step(3));
    }
    if *b == step(2) && *c == step(1) {
        // Reverse direction: a -> a-1 -> a-2, so the next move is a again.
        return Verdict::Predict(*a);
    }
    Verdict::Decline
}
