//! Entanglement diagnostics.
//!
//! - `von_neumann_entropy`: `S(ρ) = -Σ λ log2 λ` over the spectrum of a density matrix.
//! - `partial_trace_qubit`: reduced 2×2 state of one qubit.
//! - `meyer_wallach`: averaged single-qubit purity score, `Q = 2(1 - mean Tr ρ_k²)`.
//!
//! Qubit `k` always refers to bit `k` of the basis index (0 = least significant).

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;

use crate::core::error::{Result, TitanError};
use crate::core::titan::types::{dimension_for, QState, EPS};

/// Tolerance for trace, Hermiticity and eigenvalue-sign checks.
pub const STATE_TOL: f64 = 1e-8;

/// Checks square, Hermitian, unit trace and no negative eigenvalues. Returns the spectrum.
fn validated_spectrum(rho: &DMatrix<C64>) -> Result<DVector<f64>> {
    if rho.nrows() != rho.ncols() || rho.nrows() == 0 {
        return Err(TitanError::InvalidState(format!(
            "density matrix must be square and non-empty, got {}x{}",
            rho.nrows(),
            rho.ncols()
        )));
    }
    let asym = (rho - rho.adjoint()).iter().map(|z| z.norm()).fold(0.0_f64, f64::max);
    if asym > STATE_TOL {
        return Err(TitanError::InvalidState(format!(
            "density matrix not Hermitian (‖ρ−ρᴴ‖∞={asym:e})"
        )));
    }
    let tr = rho.trace();
    if (tr.re - 1.0).abs() > STATE_TOL || tr.im.abs() > STATE_TOL {
        return Err(TitanError::InvalidState(format!("density matrix trace is {tr}, expected 1")));
    }
    let spectrum = rho.symmetric_eigenvalues();
    if let Some(min) = spectrum.iter().copied().reduce(f64::min) {
        if min < -STATE_TOL {
            return Err(TitanError::InvalidState(format!(
                "density matrix not positive semi-definite (λ_min = {min:e})"
            )));
        }
    }
    Ok(spectrum)
}

/// Entropy in bits. Eigenvalues at or below `EPS` contribute nothing.
pub fn von_neumann_entropy(rho: &DMatrix<C64>) -> Result<f64> {
    let spectrum = validated_spectrum(rho)?;
    let s: f64 = spectrum
        .iter()
        .filter(|&&lambda| lambda > EPS)
        .map(|&lambda| -lambda * lambda.log2())
        .sum();
    // Clamp the tiny negative values left by rounding on pure states.
    Ok(s.max(0.0))
}

/// ρ_k = Tr_{¬k} |ψ⟩⟨ψ|
pub fn partial_trace_qubit(psi: &QState, k: usize) -> Result<DMatrix<C64>> {
    let n = psi.num_qubits().ok_or(TitanError::InvalidDimension {
        expected: None,
        actual: psi.data.len(),
    })?;
    if k >= n {
        return Err(TitanError::InvalidConfig(format!(
            "qubit {k} out of range for {n}-qubit state"
        )));
    }
    let mask = 1usize << k;
    let mut rho = DMatrix::<C64>::zeros(2, 2);
    for rest in (0..psi.data.len()).filter(|i| i & mask == 0) {
        for a in 0..2 {
            for b in 0..2 {
                let i = rest | (a << k);
                let j = rest | (b << k);
                rho[(a, b)] += psi.data[i] * psi.data[j].conj();
            }
        }
    }
    Ok(rho)
}

/// Tr ρ²
pub fn purity(rho: &DMatrix<C64>) -> f64 {
    (rho * rho).trace().re
}

/// Entropy of qubit `k`'s reduced state, in bits.
pub fn entanglement_entropy(psi: &QState, k: usize) -> Result<f64> {
    von_neumann_entropy(&partial_trace_qubit(psi, k)?)
}

/// Averaged-purity entanglement score over `n_qubits`. The input is normalized first.
pub fn meyer_wallach(amplitudes: &[C64], n_qubits: usize) -> Result<f64> {
    if n_qubits == 0 {
        return Err(TitanError::degenerate("entanglement score needs at least one qubit"));
    }
    let expected = dimension_for(n_qubits).ok_or(TitanError::InvalidDimension {
        expected: None,
        actual: amplitudes.len(),
    })?;
    if amplitudes.len() != expected {
        return Err(TitanError::InvalidDimension {
            expected: Some(expected),
            actual: amplitudes.len(),
        });
    }
    let psi = QState::try_new(DVector::from_column_slice(amplitudes), true)?;
    meyer_wallach_state(&psi)
}

/// Same as [`meyer_wallach`] for an already-normalized state.
pub fn meyer_wallach_state(psi: &QState) -> Result<f64> {
    let n = match psi.num_qubits() {
        Some(0) => {
            return Err(TitanError::degenerate("entanglement score needs at least one qubit"))
        }
        Some(n) => n,
        None => {
            return Err(TitanError::InvalidDimension { expected: None, actual: psi.data.len() })
        }
    };
    let mut purity_sum = 0.0;
    for k in 0..n {
        purity_sum += purity(&partial_trace_qubit(psi, k)?);
    }
    let q = 2.0 * (1.0 - purity_sum / n as f64);
    Ok(q.clamp(0.0, 1.0))
}
