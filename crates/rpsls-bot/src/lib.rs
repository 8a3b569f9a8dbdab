pub mod engine;
pub mod policy;

pub use engine::{Decision, DecisionSource, EngineParams, OpponentEngine, ParamsError, Strategy};
pub use policy::{
    AdaptivePolicy, BiasedPolicy, Policy, PolicyContext, PolicyError, ScriptedPolicy,
    UniformPolicy,
};
