//! Console summaries and JSON trace export.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::titan::optimization::{
    OptimizationOutcome, OptimizerSettings, OptimizerState, TraceRecord,
};
use crate::core::titan::types::ProbabilityMap;
use crate::io::atomic::atomic_write;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceFile {
    pub settings: OptimizerSettings,
    pub initial_angle: f64,
    pub shots: usize,
    pub terminal_state: OptimizerState,
    pub final_angle: f64,
    pub final_probabilities: ProbabilityMap,
    pub records: Vec<TraceRecord>,
}

impl TraceFile {
    pub fn new(
        settings: OptimizerSettings,
        initial_angle: f64,
        shots: usize,
        outcome: &OptimizationOutcome,
    ) -> Self {
        Self {
            settings,
            initial_angle,
            shots,
            terminal_state: outcome.state,
            final_angle: outcome.final_angle,
            final_probabilities: outcome.final_probabilities.clone(),
            records: outcome.trace.clone(),
        }
    }

    pub fn write_json(&self, dest: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing trace")?;
        atomic_write(dest, json).with_context(|| format!("writing {}", dest.display()))
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&txt).with_context(|| format!("parsing {}", path.display()))
    }
}

/// One line per sweep entry, tab separated.
pub fn summary_line(shots: usize, final_angle: f64, counts: &ProbabilityMap) -> String {
    format!(
        "Number of measurements:\t{shots}\tFinal parameter(angle in degrees):\t{final_angle:.9}\tFinal counts:\t{counts}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_format() {
        let counts: ProbabilityMap = vec![("00".to_string(), 0.5), ("11".to_string(), 0.5)]
            .into_iter()
            .collect();
        assert_eq!(
            summary_line(100, -84.5, &counts),
            "Number of measurements:\t100\tFinal parameter(angle in degrees):\t-84.500000000\tFinal counts:\t{'00': 0.500000, '11': 0.500000}"
        );
    }
}
