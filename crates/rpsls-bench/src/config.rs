use rpsls_bot::engine::EngineParams;
use rpsls_core::model::ruleset::Ruleset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_ROUNDS_PER_MATCH: u32 = 100;
const MAX_ROUNDS_PER_MATCH: u32 = 100_000;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root arena configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub matches: MatchConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    pub opponents: Vec<OpponentConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BenchmarkConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.matches.validate()?;
        self.engine.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        validate_opponents(&mut self.opponents)?;
        Ok(())
    }

    /// Resolve `{run_id}` placeholders in output templates.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Match scheduling block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatchConfig {
    pub seed: Option<u64>,
    /// Matches played against each opponent.
    pub count: usize,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default)]
    pub ruleset: Ruleset,
}

impl MatchConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "matches.count".to_string(),
                message: "number of matches must be greater than zero".to_string(),
            });
        }

        if self.rounds == 0 || self.rounds > MAX_ROUNDS_PER_MATCH {
            return Err(ValidationError::InvalidField {
                field: "matches.rounds".to_string(),
                message: format!("rounds must be between 1 and {MAX_ROUNDS_PER_MATCH}"),
            });
        }

        Ok(())
    }
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS_PER_MATCH
}

/// Optional overrides applied on top of the engine's base parameters.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub warmup_rounds: Option<u32>,
    #[serde(default)]
    pub restricted_max_distinct: Option<usize>,
    #[serde(default)]
    pub repeat_probability: Option<f64>,
    #[serde(default)]
    pub frequency_probability: Option<f64>,
    #[serde(default)]
    pub reactive_enabled: Option<bool>,
}

impl EngineConfig {
    pub fn apply_to(&self, base: EngineParams) -> EngineParams {
        EngineParams {
            warmup_rounds: self.warmup_rounds.unwrap_or(base.warmup_rounds),
            restricted_max_distinct: self
                .restricted_max_distinct
                .unwrap_or(base.restricted_max_distinct),
            repeat_probability: self.repeat_probability.unwrap_or(base.repeat_probability),
            frequency_probability: self
                .frequency_probability
                .unwrap_or(base.frequency_probability),
            reactive_enabled: self.reactive_enabled.unwrap_or(base.reactive_enabled),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.apply_to(EngineParams::default())
            .validate()
            .map_err(|err| ValidationError::InvalidField {
                field: "engine".to_string(),
                message: err.to_string(),
            })
    }
}

/// Definition of an arena opponent.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OpponentConfig {
    pub name: String,
    pub kind: OpponentKind,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    Scripted,
    Uniform,
    Biased,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }

        if self.jsonl == self.summary_md {
            return Err(ValidationError::InvalidField {
                field: "outputs".to_string(),
                message: "jsonl and summary_md must point at different files".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Also capture per-round engine decisions at DEBUG.
    #[serde(default)]
    pub decision_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            decision_details: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_opponents(opponents: &mut [OpponentConfig]) -> Result<(), ValidationError> {
    if opponents.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "opponents".to_string(),
            message: "at least one opponent must be specified".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for opponent in opponents.iter_mut() {
        if opponent.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "opponents.name".to_string(),
                message: "opponent name must not be empty".to_string(),
            });
        }

        if !opponent.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("opponents[{}].name", opponent.name),
                message: "opponent name contains invalid characters".to_string(),
            });
        }

        if !seen.insert(opponent.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "opponents".to_string(),
                message: format!("opponent name '{}' defined more than once", opponent.name),
            });
        }

        if opponent.params.is_null() {
            opponent.params = serde_yaml::Value::Mapping(Default::default());
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
