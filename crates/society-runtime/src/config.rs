//! Simulation configuration, loaded from YAML.

use serde::{Deserialize, Serialize};
use society_econ::{EconError, LinearPricing, TrendDynamics, WealthAffinity};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(String),
    #[error("invalid config value {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error(transparent)]
    Model(#[from] EconError),
}

/// How often the random generator produces events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Chance in [0,1] that each of the `max_per_day` slots fires.
    pub probability: f64,
    pub max_per_day: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            probability: 0.3,
            max_per_day: 2,
        }
    }
}

impl EventConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::Invalid {
                name: "events.probability",
                value: self.probability.to_string(),
            });
        }
        Ok(())
    }
}

/// Everything needed to build a [`crate::Simulation`]. Missing fields fall
/// back to their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub rng_seed: u64,
    /// Companies listed in each day summary.
    pub top_companies: usize,
    pub events: EventConfig,
    pub market: LinearPricing,
    pub dynamics: TrendDynamics,
    /// Minimum wealth per capita for exposure to discretionary sectors.
    pub affinity_wealth_threshold: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            top_companies: 5,
            events: EventConfig::default(),
            market: LinearPricing::default(),
            dynamics: TrendDynamics::default(),
            affinity_wealth_threshold: WealthAffinity::default().discretionary_wealth_threshold,
        }
    }
}

impl SimConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig =
            serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_companies == 0 {
            return Err(ConfigError::Invalid {
                name: "top_companies",
                value: self.top_companies.to_string(),
            });
        }
        if !self.affinity_wealth_threshold.is_finite() || self.affinity_wealth_threshold < 0.0 {
            return Err(ConfigError::Invalid {
                name: "affinity_wealth_threshold",
                value: self.affinity_wealth_threshold.to_string(),
            });
        }
        self.events.validate()?;
        self.market.validate()?;
        self.dynamics.validate()?;
        Ok(())
    }

    pub fn affinity(&self) -> WealthAffinity {
        WealthAffinity {
            discretionary_wealth_threshold: self.affinity_wealth_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg = SimConfig::from_yaml_str("rng_seed: 7\nevents:\n  max_per_day: 4\n").unwrap();
        assert_eq!(cfg.rng_seed, 7);
        assert_eq!(cfg.events.max_per_day, 4);
        assert_eq!(cfg.events.probability, EventConfig::default().probability);
        assert_eq!(cfg.top_companies, 5);
        assert_eq!(cfg.market, LinearPricing::default());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(SimConfig::from_yaml_str("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn rejects_bad_probability() {
        let err = SimConfig::from_yaml_str("events:\n  probability: 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "events.probability",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_top_companies() {
        let err = SimConfig::from_yaml_str("top_companies: 0").unwrap_err();
        assert!(err.to_string().contains("top_companies"));
    }

    #[test]
    fn rejects_inverted_unit_prices() {
        let yaml = "market:\n  min_unit_price: 10.0\n  max_unit_price: 1.0\n";
        assert!(matches!(
            SimConfig::from_yaml_str(yaml),
            Err(ConfigError::Model(_))
        ));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            SimConfig::from_yaml_str("rng_seed: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SimConfig::from_path("/nonexistent/society.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
