//! `qtune optimize`: one run with CLI overrides on top of the loaded config.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::RunOverrides;
use crate::config::{RunConfig, SweepEntry};
use crate::core::report::TraceFile;
use crate::core::sweep::{run_entry, SweepResult};
use crate::core::titan::optimization::OptimizerState;

/// Folds the flags into `cfg` and returns the single entry to run.
pub fn apply_overrides(cfg: &mut RunConfig, o: &RunOverrides) -> SweepEntry {
    if let Some(a) = o.angle { cfg.initial_angle = a; }
    if let Some(c) = o.cost { cfg.cost = c; }
    if let Some(n) = o.max_iterations { cfg.max_iterations = n; }
    if let Some(p) = o.precision { cfg.precision = p; }
    if let Some(m) = o.mode { cfg.mode = m; }
    if let Some(s) = o.seed { cfg.seed = Some(s); }
    if let Some(e) = o.entropy { cfg.entropy = e; }

    let base = cfg.sweep.first().cloned().unwrap_or(SweepEntry { shots: 100, learning_rate: None });
    let shots = o.shots.unwrap_or(base.shots);
    let learning_rate = match (o.learning_rate, o.shots) {
        (Some(lr), _) => Some(lr),
        // A different shot count re-derives the rate from the table.
        (None, Some(_)) => None,
        (None, None) => base.learning_rate,
    };
    SweepEntry { shots, learning_rate }
}

pub fn print_result(cfg: &RunConfig, result: &SweepResult) {
    let out = &result.outcome;
    let state = match out.state {
        OptimizerState::Converged => "converged".green().bold(),
        OptimizerState::MaxIterationsReached => "max iterations reached".yellow().bold(),
        OptimizerState::Running => "running".red().bold(),
    };
    println!("{} {} after {} epochs", "==>".cyan().bold(), state, out.iterations());
    println!("  shots:          {}", result.shots);
    println!("  learning rate:  {}", result.learning_rate);
    println!("  cost:           {}", cfg.cost);
    println!("  final angle:    {:.9}°", out.final_angle);
    if let Some(last) = out.trace.last() {
        println!("  last loss:      {:.6e}", last.loss);
        println!("  last entropy:   {:.6}", last.entropy);
        println!("  last Q:         {:.6}", last.entanglement);
    }
    println!("  final counts:   {}", out.final_probabilities);
}

pub fn main(
    mut cfg: RunConfig,
    overrides: RunOverrides,
    trace_out: Option<PathBuf>,
) -> Result<()> {
    let entry = apply_overrides(&mut cfg, &overrides);
    let result = run_entry(&cfg, &entry).context("optimization run failed")?;
    print_result(&cfg, &result);

    if let Some(path) = trace_out {
        let trace = TraceFile::new(
            cfg.optimizer_settings(result.learning_rate),
            cfg.initial_angle,
            result.shots,
            &result.outcome,
        );
        trace.write_json(&path)?;
        println!("{} trace written to {}", "ok:".green().bold(), path.display());
    }
    Ok(())
}
