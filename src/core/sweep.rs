//! Runs the optimizer once per configured sweep entry and collects the results.
//!
//! Every entry gets its own oracle and optimizer, dropped at the end of the entry.

use crate::config::{RunConfig, SimulationMode, SweepEntry};
use crate::core::error::Result;
use crate::core::titan::{
    optimization::{GradientDescentOptimizer, OptimizationOutcome},
    oracle::{BellCircuit, CircuitOracle, SampledOracle},
};
use crate::debug_log;

#[derive(Clone, Debug)]
pub struct SweepResult {
    pub shots: usize,
    pub learning_rate: f64,
    pub outcome: OptimizationOutcome,
}

#[derive(Clone, Debug, Default)]
pub struct SweepReport {
    results: Vec<SweepResult>,
}

impl SweepReport {
    pub fn push(&mut self, result: SweepResult) {
        self.results.push(result);
    }

    /// Appends another report's results after this one's.
    pub fn merge(&mut self, other: SweepReport) {
        self.results.extend(other.results);
    }

    pub fn results(&self) -> &[SweepResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Oracle for one entry: the exact Bell circuit, optionally behind a shot sampler.
pub fn build_oracle(config: &RunConfig, shots: usize) -> Result<Box<dyn CircuitOracle>> {
    match config.mode {
        SimulationMode::Exact => Ok(Box::new(BellCircuit::new())),
        SimulationMode::Sampled => {
            let sampled = SampledOracle::new(BellCircuit::new(), shots, config.seed)?;
            Ok(Box::new(sampled))
        }
    }
}

/// One optimization run for `entry`.
pub fn run_entry(config: &RunConfig, entry: &SweepEntry) -> Result<SweepResult> {
    let learning_rate = entry.learning_rate();
    debug_log!("[sweep] shots={} lr={} mode={:?}", entry.shots, learning_rate, config.mode);
    let mut oracle = build_oracle(config, entry.shots)?;
    let settings = config.optimizer_settings(learning_rate);
    let optimizer = GradientDescentOptimizer::new(settings, config.initial_angle)?;
    let outcome = optimizer.optimize(oracle.as_mut())?;
    Ok(SweepResult { shots: entry.shots, learning_rate, outcome })
}

/// All entries in order. The first failure aborts the sweep.
pub fn run_sweep(config: &RunConfig) -> Result<SweepReport> {
    let mut report = SweepReport::default();
    for entry in &config.sweep {
        report.push(run_entry(config, entry)?);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_runs_every_entry_in_order() {
        let cfg = RunConfig {
            max_iterations: 10,
            sweep: vec![
                SweepEntry { shots: 10, learning_rate: None },
                SweepEntry { shots: 100, learning_rate: Some(0.0) },
            ],
            ..RunConfig::default()
        };
        let report = run_sweep(&cfg).unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.results()[0].learning_rate, 0.38);
        assert_eq!(report.results()[1].outcome.final_angle, 0.0);
        assert!(report.results().iter().all(|r| r.outcome.iterations() == 10));
    }

    #[test]
    fn merge_appends() {
        let cfg = RunConfig { max_iterations: 2, ..RunConfig::default() };
        let mut a = run_sweep(&cfg).unwrap();
        let b = run_sweep(&cfg).unwrap();
        a.merge(b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn sampled_mode_is_reproducible_with_seed() {
        let cfg = RunConfig {
            mode: SimulationMode::Sampled,
            seed: Some(11),
            max_iterations: 25,
            ..RunConfig::default()
        };
        let a = run_sweep(&cfg).unwrap();
        let b = run_sweep(&cfg).unwrap();
        assert_eq!(a.results()[0].outcome.trace, b.results()[0].outcome.trace);
    }
}
