//! Run configuration: built-in defaults + optional TOML file + CLI overrides.
//!
//! - `RunConfig::default()` → one exact-mode run at 0°, mse, 500 epochs
//! - `RunConfig::from_toml_file(path)` → load a user file
//! - `RunConfig::load(cli_path)` → `--config` if given, else ~/.qtune/qtune.toml if present

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::titan::cost::CostKind;
use crate::core::titan::optimization::{
    EntropyTarget, OptimizerSettings, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION,
};

/// How the oracle turns the state vector into outcome probabilities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    /// |amplitude|² straight from the state vector; `shots` only picks the learning rate.
    #[default]
    Exact,
    /// Estimate from `shots` seeded samples.
    Sampled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub shots: usize,
    /// Falls back to [`learning_rate_for_shots`] when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
}

impl SweepEntry {
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate.unwrap_or_else(|| learning_rate_for_shots(self.shots))
    }
}

/// Learning rates tuned per measurement count.
pub fn learning_rate_for_shots(shots: usize) -> f64 {
    match shots {
        10 => 0.38,
        100 => 1.29,
        _ => 3.2,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Starting angle in degrees.
    pub initial_angle: f64,
    pub cost: CostKind,
    pub max_iterations: usize,
    /// Negative keeps the run going until `max_iterations`.
    pub precision: f64,
    pub outcome_a: String,
    pub outcome_b: String,
    pub entropy: EntropyTarget,
    pub mode: SimulationMode,
    pub seed: Option<u64>,
    pub sweep: Vec<SweepEntry>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_angle: 0.0,
            cost: CostKind::Mse,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            precision: DEFAULT_PRECISION,
            outcome_a: "00".to_string(),
            outcome_b: "11".to_string(),
            entropy: EntropyTarget::Full,
            mode: SimulationMode::Exact,
            seed: None,
            sweep: vec![SweepEntry { shots: 100, learning_rate: None }],
        }
    }
}

impl RunConfig {
    /// Load from TOML file. Missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&txt).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let cfg: RunConfig = toml::from_str(txt)?;
        Ok(cfg)
    }

    /// `--config` wins; otherwise the user default if it exists; otherwise built-in.
    pub fn load(cli_path: &Option<PathBuf>) -> Result<Self> {
        if let Some(p) = cli_path {
            return Self::from_toml_file(p);
        }
        if let Some(p) = default_config_path() {
            if p.exists() {
                return Self::from_toml_file(&p);
            }
        }
        Ok(Self::default())
    }

    pub fn optimizer_settings(&self, learning_rate: f64) -> OptimizerSettings {
        OptimizerSettings {
            learning_rate,
            cost: self.cost,
            max_iterations: self.max_iterations,
            precision: self.precision,
            outcome_a: self.outcome_a.clone(),
            outcome_b: self.outcome_b.clone(),
            entropy: self.entropy,
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing run config")
    }
}

/// ~/.qtune/qtune.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::home_dir().map(|h| h.join(".qtune").join("qtune.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(RunConfig::from_toml_str("").unwrap(), RunConfig::default());
    }

    #[test]
    fn partial_file_overrides_selected_keys() {
        let cfg = RunConfig::from_toml_str(
            r#"
            initial_angle = 15.0
            cost = "unsymmetrical"
            entropy = "qubit0"
            mode = "sampled"
            seed = 42

            [[sweep]]
            shots = 10

            [[sweep]]
            shots = 1000
            learning_rate = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.initial_angle, 15.0);
        assert_eq!(cfg.cost, CostKind::Unsymmetrical);
        assert_eq!(cfg.entropy, EntropyTarget::Qubit0);
        assert_eq!(cfg.mode, SimulationMode::Sampled);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.max_iterations, 500);
        assert_eq!(cfg.sweep[0].learning_rate(), 0.38);
        assert_eq!(cfg.sweep[1].learning_rate(), 0.5);
    }

    #[test]
    fn unknown_cost_is_a_parse_error() {
        assert!(RunConfig::from_toml_str("cost = \"huber\"").is_err());
    }

    #[test]
    fn learning_rate_table() {
        assert_eq!(learning_rate_for_shots(10), 0.38);
        assert_eq!(learning_rate_for_shots(100), 1.29);
        assert_eq!(learning_rate_for_shots(1024), 3.2);
    }

    #[test]
    fn toml_round_trip_keeps_values() {
        let cfg = RunConfig { seed: Some(3), ..RunConfig::default() };
        let txt = cfg.to_toml_string().unwrap();
        assert_eq!(RunConfig::from_toml_str(&txt).unwrap(), cfg);
    }
}
