//! TOML configuration for the pose generator.
//!
//! A config file carries the seed, the sensor names, and the ordered rule
//! list.  Rule order in the file is the match priority.
//!
//! ```toml
//! seed = 42
//! sensors = ["center", "pilot", "pilot_pinhole"]
//!
//! [[rules]]
//! labels = "road_type=highway user_label=stable"
//! flip = true
//! shift        = { distribution = "gaussian", max = 0.5, std_dev = 0.34 }
//! rotation     = { distribution = "gaussian", max = 4.0, std_dev = 1.0 }
//! forward      = { distribution = "gaussian", max = 0.8, std_dev = 0.5 }
//! sensor_yaw   = { distribution = "gaussian", max = 5.0, std_dev = 3.0 }
//! sensor_pitch = { distribution = "gaussian", max = 6.0, std_dev = 3.0 }
//! sensor_roll  = { distribution = "gaussian", max = 0.0 }
//! ```

use posegen_core::params::{ParamsError, PerturbParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("rule {index}, channel {channel}: {source}")]
    InvalidValue {
        index: usize,
        channel: &'static str,
        #[source]
        source: ParamsError,
    },
}

// ---------------------------------------------------------------------------
// RuleConfig
// ---------------------------------------------------------------------------

/// One configured rule: a raw condition string plus the full channel set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whitespace-separated `key=value` label conditions.
    pub labels: String,

    /// Sampling parameters for frames matching `labels`.
    #[serde(flatten)]
    pub params: PerturbParams,
}

// ---------------------------------------------------------------------------
// GeneratorConfig
// ---------------------------------------------------------------------------

/// Complete generator configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Master random seed (default 0).
    #[serde(default)]
    pub seed: u64,

    /// Sensor names receiving per-sensor yaw/pitch/roll perturbations.
    #[serde(default)]
    pub sensors: Vec<String>,

    /// Perturbation rules, in priority order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl GeneratorConfig {
    /// Validate the numeric invariants of every rule's channels.
    ///
    /// Label validity is not checked here — that needs the label schema and
    /// is the rule set's responsibility at generator construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first failing rule
    /// and channel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, rule) in self.rules.iter().enumerate() {
            rule.params
                .validate()
                .map_err(|(channel, source)| ConfigError::InvalidValue {
                    index,
                    channel,
                    source,
                })?;
        }
        Ok(())
    }

    /// Load from a TOML file and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`], [`ConfigError::Toml`], or a validation
    /// error.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// The rules as raw `(condition_string, params)` pairs, in file order.
    pub fn rule_specs(&self) -> Vec<(String, PerturbParams)> {
        self.rules
            .iter()
            .map(|rule| (rule.labels.clone(), rule.params.clone()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
