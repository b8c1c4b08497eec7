//! Ensemble configuration.

use crate::scenarios::ScenarioId;
use crate::SimError;
use gillespie_core::Method;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which interval each trial is windowed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSpan {
    /// From `t_start` to the trial's own final time
    #[default]
    Terminal,

    /// From `t_start` to the configured `t_end`
    Horizon,
}

/// Configuration for an ensemble run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Master seed; trial seeds are derived from it
    pub seed: u64,

    /// Event selection method
    pub method: Method,

    /// Network to simulate
    pub scenario: ScenarioId,

    /// Initial counts in species-vector order
    pub initial_counts: Vec<u64>,

    /// Rate constants in reaction order
    pub rate_constants: Vec<f64>,

    /// Simulation start time
    pub t_start: f64,

    /// Simulation horizon
    pub t_end: f64,

    /// Number of windowing checkpoints (intervals + 1)
    pub checkpoints: usize,

    /// Number of independent trials
    pub trials: usize,

    /// Worker threads; `None` runs trials sequentially
    pub threads: Option<usize>,

    pub window_span: WindowSpan,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::for_scenario(ScenarioId::GibsonBruck)
    }
}

impl SimConfig {
    /// Default configuration with the scenario's reference counts and unit rates.
    pub fn for_scenario(scenario: ScenarioId) -> Self {
        Self {
            seed: 42,
            method: Method::Direct,
            scenario,
            initial_counts: scenario.default_counts(),
            rate_constants: vec![1.0; scenario.reaction_count()],
            t_start: 0.0,
            t_end: 1.0,
            checkpoints: 10,
            trials: 100,
            threads: None,
            window_span: WindowSpan::Terminal,
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Checks the configuration against the scenario topology.
    ///
    /// Rate constants are not checked for sign: a negative rate surfaces as a
    /// per-trial failure once its propensity goes negative.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.initial_counts.len() != self.scenario.species_count() {
            return Err(SimError::config(format!(
                "scenario {} needs {} initial counts, got {}",
                self.scenario,
                self.scenario.species_count(),
                self.initial_counts.len()
            )));
        }
        if self.rate_constants.len() != self.scenario.reaction_count() {
            return Err(SimError::config(format!(
                "scenario {} needs {} rate constants, got {}",
                self.scenario,
                self.scenario.reaction_count(),
                self.rate_constants.len()
            )));
        }
        if !self.t_start.is_finite() || !self.t_end.is_finite() || self.t_end < self.t_start {
            return Err(SimError::config(format!(
                "invalid time window [{}, {}]",
                self.t_start, self.t_end
            )));
        }
        if self.checkpoints < 2 {
            return Err(SimError::config("need at least 2 checkpoints"));
        }
        if self.trials == 0 {
            return Err(SimError::config("need at least 1 trial"));
        }
        if self.threads == Some(0) {
            return Err(SimError::config("thread count must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_scenario() {
        let config = SimConfig::default();
        assert_eq!(config.scenario, ScenarioId::GibsonBruck);
        assert_eq!(config.initial_counts, vec![6, 14, 8, 12, 9, 3, 5]);
        assert_eq!(config.rate_constants, vec![1.0; 5]);
        assert_eq!(config.method, Method::Direct);
        assert_eq!(config.window_span, WindowSpan::Terminal);
        assert_eq!(WindowSpan::default(), WindowSpan::Terminal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SimConfig::default();
        config.initial_counts.pop();
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.t_end = -1.0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.checkpoints = 1;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.trials = 0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.threads = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str(
            r#"{ "seed": 7, "method": "first_reaction", "window_span": "horizon", "trials": 3 }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.method, Method::FirstReaction);
        assert_eq!(config.window_span, WindowSpan::Horizon);
        assert_eq!(config.trials, 3);
        assert_eq!(config.checkpoints, 10);
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("gillespie_config_{}.json", std::process::id()));
        let mut config = SimConfig::for_scenario(ScenarioId::Catalysis);
        config.threads = Some(2);
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = SimConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);

        assert!(matches!(
            SimConfig::from_json_file("/nonexistent/gillespie.json"),
            Err(SimError::Io(_))
        ));
    }
}
