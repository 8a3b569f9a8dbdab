use thiserror::Error;

const DEFAULT_WARMUP_ROUNDS: u32 = 3;
const DEFAULT_RESTRICTED_MAX_DISTINCT: usize = 3;
const DEFAULT_REPEAT_PROBABILITY: f64 = 0.7;
const DEFAULT_FREQUENCY_PROBABILITY: f64 = 0.8;

/// Tunable thresholds and probability gates for the strategy engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    /// Rounds observed before any predictive strategy runs (default: 3)
    pub warmup_rounds: u32,

    /// Distinct moves allowed in the pattern window for the
    /// restricted-move-set detector to fire (default: 3)
    pub restricted_max_distinct: usize,

    /// Chance an immediate repeat is predicted to continue (default: 0.7)
    pub repeat_probability: f64,

    /// Chance the frequency fallback counters the most frequent move (default: 0.8)
    pub frequency_probability: f64,

    /// Reactive-response detector on/off. While on it fires whenever three
    /// moves exist, so the frequency fallback is only reached when off.
    pub reactive_enabled: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            warmup_rounds: DEFAULT_WARMUP_ROUNDS,
            restricted_max_distinct: DEFAULT_RESTRICTED_MAX_DISTINCT,
            repeat_probability: DEFAULT_REPEAT_PROBABILITY,
            frequency_probability: DEFAULT_FREQUENCY_PROBABILITY,
            reactive_enabled: true,
        }
    }
}

impl EngineParams {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn with_reactive(mut self, enabled: bool) -> Self {
        self.reactive_enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        for (field, value) in [
            ("repeat_probability", self.repeat_probability),
            ("frequency_probability", self.frequency_probability),
        ] {
            if !is_probability(value) {
                return Err(ParamsError::Probability { field, value });
            }
        }

        if self.restricted_max_distinct == 0 || self.restricted_max_distinct > 5 {
            return Err(ParamsError::DistinctLimit {
                value: self.restricted_max_distinct,
            });
        }

        Ok(())
    }

    pub(crate) fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let warmup_rounds = read("RPSLS_WARMUP_ROUNDS")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(defaults.warmup_rounds);

        let repeat_probability = read("RPSLS_REPEAT_PROBABILITY")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| is_probability(*value))
            .unwrap_or(defaults.repeat_probability);

        let frequency_probability = read("RPSLS_FREQUENCY_PROBABILITY")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| is_probability(*value))
            .unwrap_or(defaults.frequency_probability);

        let reactive_enabled = read("RPSLS_REACTIVE")
            .map(|raw| !matches!(raw.trim(), "0" | "false" | "FALSE" | "off" | "OFF"))
            .unwrap_or(defaults.reactive_enabled);

        Self {
            warmup_rounds,
            repeat_probability,
            frequency_probability,
            reactive_enabled,
            ..defaults
        }
    }
}

fn is_probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("{field} must lie in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("restricted_max_distinct must lie in 1..=5, got {value}")]
    DistinctLimit { value: usize },
}
