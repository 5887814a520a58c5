//! Circuit oracles: angle (radians) -> state vector + outcome distribution.
//!
//! - `BellCircuit`: |00⟩ → RY(θ) on q0 → CNOT(q0 → q1), exact state-vector evaluation.
//! - `SampledOracle`: wraps any oracle and replaces its distribution with a shot estimate.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::error::{Result, TitanError};
use crate::core::titan::{
    gates, ops,
    types::{ProbabilityMap, QOp, QState},
};

#[derive(Clone, Debug)]
pub struct OracleOutput {
    pub state: QState,
    pub probabilities: ProbabilityMap,
}

pub trait CircuitOracle {
    fn num_qubits(&self) -> usize;
    fn evaluate(&mut self, angle_radians: f64) -> Result<OracleOutput>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BellCircuit;

impl BellCircuit {
    pub const QUBITS: usize = 2;

    pub fn new() -> Self {
        Self
    }

    /// Full 4×4 unitary for angle `theta`.
    pub fn unitary(&self, theta: f64) -> Result<QOp> {
        let ry = ops::lift_1q(&gates::ry(theta), Self::QUBITS, 0)?;
        let cx = ops::cnot_n(Self::QUBITS, 0, 1)?;
        let u = ry.then(&cx)?;
        QOp::try_new_unitary(u.m)
    }

    /// Text listing of the gate sequence, one qubit per line.
    pub fn listing(&self, angle_degrees: f64) -> String {
        let param = format!("RY({angle_degrees:.2}°)");
        let pad = "─".repeat(param.chars().count());
        let mut out = String::new();
        out.push_str(&format!("q0: |0⟩─{param}─░───●───░─\n"));
        out.push_str(&format!("q1: |0⟩─{pad}─░───X───░─\n"));
        out
    }
}

impl CircuitOracle for BellCircuit {
    fn num_qubits(&self) -> usize {
        Self::QUBITS
    }

    fn evaluate(&mut self, angle_radians: f64) -> Result<OracleOutput> {
        if !angle_radians.is_finite() {
            return Err(TitanError::oracle("cannot bind a non-finite angle"));
        }
        let psi0 = QState::basis(Self::QUBITS, 0)?;
        let state = self.unitary(angle_radians)?.apply(&psi0)?;
        // Re-normalize to absorb rounding from the matrix products.
        let state = QState::try_new(state.data, true)?;
        let probabilities = state.probabilities();
        Ok(OracleOutput { state, probabilities })
    }
}

/// Estimates the distribution of `inner` from `shots` samples.
pub struct SampledOracle<O> {
    inner: O,
    shots: usize,
    rng: StdRng,
}

impl<O: CircuitOracle> SampledOracle<O> {
    pub fn new(inner: O, shots: usize, seed: Option<u64>) -> Result<Self> {
        if shots == 0 {
            return Err(TitanError::config("sampled oracle needs at least one shot"));
        }
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Ok(Self { inner, shots, rng })
    }
}

impl<O: CircuitOracle> CircuitOracle for SampledOracle<O> {
    fn num_qubits(&self) -> usize {
        self.inner.num_qubits()
    }

    fn evaluate(&mut self, angle_radians: f64) -> Result<OracleOutput> {
        let exact = self.inner.evaluate(angle_radians)?;
        let (outcomes, weights): (Vec<&str>, Vec<f64>) = exact.probabilities.iter().unzip();
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| TitanError::OracleFailure(format!("cannot sample distribution: {e}")))?;
        let mut counts = vec![0usize; outcomes.len()];
        for _ in 0..self.shots {
            counts[dist.sample(&mut self.rng)] += 1;
        }
        let probabilities = outcomes
            .iter()
            .zip(counts)
            .filter(|(_, n)| *n > 0)
            .map(|(k, n)| (k.to_string(), n as f64 / self.shots as f64))
            .collect();
        Ok(OracleOutput { state: exact.state, probabilities })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_angle_stays_in_ground_state() {
        let out = BellCircuit::new().evaluate(0.0).unwrap();
        assert_eq!(out.probabilities.probability_of("00"), 1.0);
        assert_eq!(out.probabilities.probability_of("11"), 0.0);
    }

    #[test]
    fn half_pi_gives_equal_mixture() {
        let out = BellCircuit::new().evaluate(FRAC_PI_2).unwrap();
        assert!((out.probabilities.probability_of("00") - 0.5).abs() < 1e-12);
        assert!((out.probabilities.probability_of("11") - 0.5).abs() < 1e-12);
        assert!(out.probabilities.probability_of("01") < 1e-24);
    }

    #[test]
    fn pi_gives_all_ones() {
        let out = BellCircuit::new().evaluate(PI).unwrap();
        assert!((out.probabilities.probability_of("11") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn distribution_and_norm_invariants() {
        let mut circuit = BellCircuit::new();
        for deg in [-170.0_f64, -33.3, 0.0, 12.5, 90.0, 181.0] {
            let out = circuit.evaluate(deg.to_radians()).unwrap();
            assert!((out.state.norm() - 1.0).abs() < 1e-12);
            assert!((out.probabilities.total() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn nan_angle_is_an_oracle_failure() {
        let err = BellCircuit::new().evaluate(f64::NAN).unwrap_err();
        assert!(matches!(err, TitanError::OracleFailure(_)));
    }

    #[test]
    fn sampling_is_seeded_and_normalized() {
        let mut a = SampledOracle::new(BellCircuit::new(), 100, Some(7)).unwrap();
        let mut b = SampledOracle::new(BellCircuit::new(), 100, Some(7)).unwrap();
        let pa = a.evaluate(FRAC_PI_2).unwrap().probabilities;
        let pb = b.evaluate(FRAC_PI_2).unwrap().probabilities;
        assert_eq!(pa, pb);
        assert!((pa.total() - 1.0).abs() < 1e-9);
        assert!(SampledOracle::new(BellCircuit::new(), 0, None).is_err());
    }
}
