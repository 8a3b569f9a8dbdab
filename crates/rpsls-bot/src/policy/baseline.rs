use super::{Policy, PolicyContext, PolicyError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpsls_core::model::moves::Move;

/// Uniform choice over the ruleset's legal moves.
pub struct UniformPolicy {
    name: String,
    rng: StdRng,
}

impl UniformPolicy {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for UniformPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, ctx: &PolicyContext) -> Move {
        let moves = ctx.ruleset.moves();
        moves[self.rng.gen_range(0..moves.len())]
    }
}

/// Replays a fixed move sequence, wrapping at the end.
pub struct ScriptedPolicy {
    name: String,
    sequence: Vec<Move>,
    cursor: usize,
}

impl ScriptedPolicy {
    pub fn new(name: impl Into<String>, sequence: Vec<Move>) -> Result<Self, PolicyError> {
        let name = name.into();
        if sequence.is_empty() {
            return Err(PolicyError::EmptySequence { name });
        }
        Ok(Self {
            name,
            sequence,
            cursor: 0,
        })
    }

    pub fn sequence(&self) -> &[Move] {
        &self.sequence
    }
}

impl Policy for ScriptedPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, _ctx: &PolicyContext) -> Move {
        let mv = self.sequence[self.cursor % self.sequence.len()];
        self.cursor = (self.cursor + 1) % self.sequence.len();
        mv
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Weighted random choice, e.g. an opponent who favours Rock.
pub struct BiasedPolicy {
    name: String,
    moves: Vec<Move>,
    distribution: WeightedIndex<u32>,
    rng: StdRng,
}

impl BiasedPolicy {
    pub fn new(
        name: impl Into<String>,
        weights: &[(Move, u32)],
        seed: u64,
    ) -> Result<Self, PolicyError> {
        let name = name.into();
        let distribution = WeightedIndex::new(weights.iter().map(|(_, weight)| *weight))
            .map_err(|err| PolicyError::InvalidWeights {
                name: name.clone(),
                message: err.to_string(),
            })?;
        Ok(Self {
            name,
            moves: weights.iter().map(|(mv, _)| *mv).collect(),
            distribution,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl Policy for BiasedPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, _ctx: &PolicyContext) -> Move {
        self.moves[self.distribution.sample(&mut self.rng)]
    }
}
