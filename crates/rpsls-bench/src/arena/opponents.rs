use super::OpponentError;
use crate::config::{OpponentConfig, OpponentKind};
use rpsls_bot::policy::{BiasedPolicy, Policy, ScriptedPolicy, UniformPolicy};
use rpsls_core::model::moves::Move;
use serde_yaml::Value;

/// Parsed opponent definition; spawns a fresh policy per match.
pub(super) struct OpponentBlueprint {
    pub(super) name: String,
    pub(super) kind: OpponentKind,
    profile: Profile,
}

enum Profile {
    Scripted(Vec<Move>),
    Uniform,
    Biased(Vec<(Move, u32)>),
}

impl OpponentBlueprint {
    pub(super) fn from_configs(configs: &[OpponentConfig]) -> Result<Vec<Self>, OpponentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &OpponentConfig) -> Result<Self, OpponentError> {
        let name = config.name.as_str();
        let profile = match config.kind {
            OpponentKind::Scripted => Profile::Scripted(parse_sequence(name, &config.params)?),
            OpponentKind::Uniform => Profile::Uniform,
            OpponentKind::Biased => Profile::Biased(parse_weights(name, &config.params)?),
        };

        let blueprint = Self {
            name: config.name.clone(),
            kind: config.kind,
            profile,
        };
        // Fail at load time on bad sequences or weights.
        blueprint.spawn_policy(0)?;
        Ok(blueprint)
    }

    pub(super) fn spawn_policy(&self, seed: u64) -> Result<Box<dyn Policy>, OpponentError> {
        let policy: Box<dyn Policy> = match &self.profile {
            Profile::Scripted(sequence) => {
                Box::new(ScriptedPolicy::new(self.name.clone(), sequence.clone())?)
            }
            Profile::Uniform => Box::new(UniformPolicy::new(self.name.clone(), seed)),
            Profile::Biased(weights) => {
                Box::new(BiasedPolicy::new(self.name.clone(), weights, seed)?)
            }
        };
        Ok(policy)
    }
}

fn lookup<'a>(params: &'a Value, key: &str) -> Option<&'a Value> {
    params
        .as_mapping()?
        .iter()
        .find_map(|(k, value)| (k.as_str() == Some(key)).then_some(value))
}

fn invalid(name: &str, message: impl Into<String>) -> OpponentError {
    OpponentError::InvalidParam {
        name: name.to_string(),
        message: message.into(),
    }
}

fn parse_move(name: &str, value: &Value) -> Result<Move, OpponentError> {
    let text = value
        .as_str()
        .ok_or_else(|| invalid(name, "moves must be strings"))?;
    text.parse::<Move>().map_err(|err| invalid(name, format!("{err}")))
}

/// Accepts a list of move names or a compact shorthand string such as `"rrpk"`.
fn parse_sequence(name: &str, params: &Value) -> Result<Vec<Move>, OpponentError> {
    let value = lookup(params, "sequence")
        .ok_or_else(|| invalid(name, "scripted opponents need a 'sequence'"))?;

    match value {
        Value::Sequence(items) => items.iter().map(|item| parse_move(name, item)).collect(),
        Value::String(text) => text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| {
                c.to_string()
                    .parse::<Move>()
                    .map_err(|err| invalid(name, format!("{err}")))
            })
            .collect(),
        _ => Err(invalid(name, "sequence must be a list or a string")),
    }
}

fn parse_weights(name: &str, params: &Value) -> Result<Vec<(Move, u32)>, OpponentError> {
    let mapping = lookup(params, "weights")
        .and_then(Value::as_mapping)
        .ok_or_else(|| invalid(name, "biased opponents need a 'weights' mapping"))?;

    let mut weights = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let mv = parse_move(name, key)?;
        let weight = value
            .as_u64()
            .and_then(|w| u32::try_from(w).ok())
            .ok_or_else(|| invalid(name, format!("weight for {mv} must be a non-negative integer")))?;
        weights.push((mv, weight));
    }
    Ok(weights)
}
