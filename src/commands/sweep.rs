//! `qtune sweep`: every configured entry, then the summary table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::RunConfig;
use crate::core::report::{summary_line, TraceFile};
use crate::core::sweep::run_sweep;

pub fn main(cfg: RunConfig, trace_dir: Option<PathBuf>) -> Result<()> {
    if cfg.sweep.is_empty() {
        eprintln!("{} no [[sweep]] entries configured, nothing to run", "warn:".yellow().bold());
        return Ok(());
    }
    let report = run_sweep(&cfg).context("sweep failed")?;

    for (i, result) in report.results().iter().enumerate() {
        super::optimize::print_result(&cfg, result);
        if let Some(dir) = &trace_dir {
            let path = dir.join(format!("trace_{:02}_shots_{}.json", i + 1, result.shots));
            TraceFile::new(
                cfg.optimizer_settings(result.learning_rate),
                cfg.initial_angle,
                result.shots,
                &result.outcome,
            )
            .write_json(&path)?;
        }
    }

    println!();
    println!("{}", "Summary".bold().underline());
    for result in report.results() {
        let out = &result.outcome;
        println!("{}", summary_line(result.shots, out.final_angle, &out.final_probabilities));
    }
    if let Some(dir) = trace_dir {
        println!("{} {} trace file(s) in {}", "ok:".green().bold(), report.len(), dir.display());
    }
    Ok(())
}
