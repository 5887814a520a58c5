//! `qtune entangle`: averaged-purity score and per-qubit entropies of a state.

use anyhow::{bail, Result};
use colored::Colorize;
use nalgebra::DVector;
use num_complex::Complex64 as C64;

use crate::cli::StatePreset;
use crate::core::titan::entanglement::{entanglement_entropy, meyer_wallach};
use crate::core::titan::types::QState;

pub fn preset_amplitudes(preset: StatePreset) -> Vec<f64> {
    let s = 1.0_f64 / 2.0_f64.sqrt();
    match preset {
        StatePreset::Bell => vec![0.0, s, s, 0.0],
        StatePreset::Product => vec![1.0, 0.0, 0.0, 0.0],
    }
}

pub fn main(
    qubits: Option<usize>,
    preset: Option<StatePreset>,
    amplitudes: Vec<f64>,
) -> Result<()> {
    let amps = match preset {
        Some(p) => preset_amplitudes(p),
        None => amplitudes,
    };
    if amps.is_empty() {
        bail!("no amplitudes given (pass values or --preset bell|product)");
    }
    let n = match qubits {
        Some(n) => n,
        None if amps.len().is_power_of_two() => amps.len().trailing_zeros() as usize,
        None => bail!("{} amplitudes is not a power of two; pass --qubits", amps.len()),
    };

    let amps: Vec<C64> = amps.iter().map(|&a| C64::new(a, 0.0)).collect();
    let q = meyer_wallach(&amps, n)?;
    println!("{} Q = {:.6}", "==>".cyan().bold(), q);

    let psi = QState::try_new(DVector::from_vec(amps), true)?;
    for k in 0..n {
        let s = entanglement_entropy(&psi, k)?;
        println!("  S(q{k}) = {s:.6} bits");
    }
    Ok(())
}
