use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::SimulationMode;
use crate::core::titan::cost::CostKind;
use crate::core::titan::optimization::EntropyTarget;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum StatePreset {
    /// (|01⟩ + |10⟩)/√2
    Bell,
    /// |00⟩
    Product,
}

#[derive(Debug, Parser)]
#[command(
    name = "qtune",
    about = "Tune a one-angle Bell circuit by gradient descent and score its entanglement",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QtuneCli {
    /// Global: path to config (TOML); default: ~/.qtune/qtune.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: print per-epoch debug output (same as QTUNE_DEBUG=1)
    #[arg(long = "debug", action = ArgAction::SetTrue, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

/// Flags that override the loaded config for a single run.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunOverrides {
    /// Starting angle in degrees
    #[arg(long = "angle", value_name = "DEG", allow_negative_numbers = true)]
    pub angle: Option<f64>,
    #[arg(long = "learning-rate", value_name = "LR", allow_negative_numbers = true)]
    pub learning_rate: Option<f64>,
    #[arg(long = "cost", value_enum, value_name = "KIND")]
    pub cost: Option<CostKind>,
    #[arg(long = "max-iterations", value_name = "N")]
    pub max_iterations: Option<usize>,
    /// Step-size threshold below 1; negative runs until --max-iterations
    #[arg(long = "precision", value_name = "P", allow_negative_numbers = true)]
    pub precision: Option<f64>,
    #[arg(long = "shots", value_name = "N")]
    pub shots: Option<usize>,
    #[arg(long = "mode", value_enum, value_name = "MODE")]
    pub mode: Option<SimulationMode>,
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,
    #[arg(long = "entropy", value_enum, value_name = "TARGET")]
    pub entropy: Option<EntropyTarget>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the optimizer once
    ///
    /// Examples:
    ///   qtune optimize --angle 0 --learning-rate 1.29
    ///   qtune optimize --cost unsymmetrical --trace-out trace.json
    Optimize {
        #[command(flatten)]
        overrides: RunOverrides,
        /// Write the full trace as JSON
        #[arg(long = "trace-out", value_name = "FILE")]
        trace_out: Option<PathBuf>,
    },

    /// Run every configured sweep entry and print the summary table
    Sweep {
        /// Write one JSON trace per entry into DIR
        #[arg(long = "trace-dir", value_name = "DIR")]
        trace_dir: Option<PathBuf>,
    },

    /// Score the entanglement of an amplitude vector
    ///
    /// Examples:
    ///   qtune entangle --qubits 2 0 0.7071 0.7071 0
    ///   qtune entangle --preset bell
    Entangle {
        /// Number of qubits (default: log2 of the amplitude count)
        #[arg(long = "qubits", value_name = "N")]
        qubits: Option<usize>,
        #[arg(long = "preset", value_enum, conflicts_with = "amplitudes")]
        preset: Option<StatePreset>,
        /// Real amplitudes, normalized before scoring
        #[arg(value_name = "AMPLITUDES", allow_negative_numbers = true)]
        amplitudes: Vec<f64>,
    },

    /// Print the circuit and its output distribution at an angle
    Circuit {
        #[arg(
            long = "angle",
            value_name = "DEG",
            default_value_t = 90.0,
            allow_negative_numbers = true
        )]
        angle: f64,
    },
}
