use super::{Policy, PolicyContext};
use crate::engine::{Decision, EngineParams, OpponentEngine};
use rpsls_core::model::moves::Move;
use tracing::{Level, event};

/// Adapter that exposes the strategy engine through the Policy trait
pub struct AdaptivePolicy {
    name: String,
    engine: OpponentEngine,
    last_decision: Option<Decision>,
}

impl AdaptivePolicy {
    pub fn new(name: impl Into<String>, engine: OpponentEngine) -> Self {
        Self {
            name: name.into(),
            engine,
            last_decision: None,
        }
    }

    pub fn with_seed(name: impl Into<String>, params: EngineParams, seed: u64) -> Self {
        Self::new(name, OpponentEngine::with_params_and_seed(params, seed))
    }

    pub fn engine(&self) -> &OpponentEngine {
        &self.engine
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }
}

impl Policy for AdaptivePolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, ctx: &PolicyContext) -> Move {
        let decision = self.engine.decide();
        self.last_decision = Some(decision);
        log_decision(&self.name, ctx, &decision, self.engine.rounds());
        decision.chosen
    }

    fn observe(&mut self, opponent: Move) {
        self.engine.record_opponent_move(opponent);
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.last_decision = None;
    }
}

fn log_decision(name: &str, ctx: &PolicyContext, decision: &Decision, observed: u32) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let prediction = decision
        .prediction
        .map(|mv| mv.as_str())
        .unwrap_or("none");

    event!(
        target: "rpsls_bot::decision",
        Level::DEBUG,
        policy = %name,
        round = ctx.round,
        ruleset = ctx.ruleset.as_str(),
        observed,
        source = decision.source.as_str(),
        prediction,
        chosen = decision.chosen.as_str(),
    );
}

#[cfg(test)]
mod tests {
    use super::AdaptivePolicy;
    use crate::engine::{DecisionSource, EngineParams, Strategy};
    use crate::policy::{Policy, PolicyContext};
    use rpsls_core::model::moves::Move;
    use rpsls_core::model::ruleset::Ruleset;

    fn ctx(round: u32) -> PolicyContext {
        PolicyContext {
            ruleset: Ruleset::Extended,
            round,
        }
    }

    #[test]
    fn observe_feeds_engine_history() {
        let mut policy = AdaptivePolicy::with_seed("engine", EngineParams::default(), 10);
        for (round, mv) in [Move::Rock, Move::Paper, Move::Rock, Move::Paper, Move::Rock]
            .into_iter()
            .enumerate()
        {
            policy.choose(&ctx(round as u32));
            policy.observe(mv);
        }
        let chosen = policy.choose(&ctx(5));
        let decision = policy.last_decision().expect("decision recorded");
        assert_eq!(decision.chosen, chosen);
        assert_eq!(decision.source, DecisionSource::Strategy(Strategy::Alternation));
        assert_eq!(policy.engine().rounds(), 5);
    }

    #[test]
    fn reset_clears_engine_and_last_decision() {
        let mut policy = AdaptivePolicy::with_seed("engine", EngineParams::default(), 11);
        policy.choose(&ctx(0));
        policy.observe(Move::Spock);
        policy.reset();
        assert!(policy.last_decision().is_none());
        assert_eq!(policy.engine().rounds(), 0);
        assert_eq!(policy.name(), "engine");
    }
}
