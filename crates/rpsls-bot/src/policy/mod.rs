mod adaptive;
mod baseline;

pub use adaptive::AdaptivePolicy;
pub use baseline::{BiasedPolicy, ScriptedPolicy, UniformPolicy};

use rpsls_core::model::moves::Move;
use rpsls_core::model::ruleset::Ruleset;
use thiserror::Error;

/// Context provided to policies for each round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyContext {
    pub ruleset: Ruleset,
    /// Zero-based index of the round being played
    pub round: u32,
}

/// Unified interface for anything that picks moves in a match
pub trait Policy: Send {
    fn name(&self) -> &str;

    /// Choose the move for the current round
    fn choose(&mut self, ctx: &PolicyContext) -> Move;

    /// Observe the move the other side played once the round resolves
    fn observe(&mut self, _opponent: Move) {}

    /// Forget everything learned during the current match
    fn reset(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("scripted policy '{name}' needs at least one move")]
    EmptySequence { name: String },
    #[error("invalid weights for policy '{name}': {message}")]
    InvalidWeights { name: String, message: String },
}
