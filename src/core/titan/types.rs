//! Core quantum types for Titan.
use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TitanError};

pub const EPS: f64 = 1e-12;

#[derive(Clone, Debug)]
pub struct QState {
    pub data: DVector<C64>,
}

impl QState {
    /// Create from raw vector; rejects non-normalized unless `auto_normalize = true`.
    pub fn try_new(vec: DVector<C64>, auto_normalize: bool) -> Result<Self> {
        let mut v = vec;
        let norm = v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        if (norm - 1.0).abs() < 1e-9 {
            Ok(Self { data: v })
        } else if auto_normalize {
            if norm < EPS {
                return Err(TitanError::invalid_state("QState norm ~ 0"));
            }
            v /= C64::from(norm);
            Ok(Self { data: v })
        } else {
            Err(TitanError::InvalidState(format!("QState not normalized (||ψ|| = {norm})")))
        }
    }

    /// Computational basis state |index⟩ over `n_qubits`.
    pub fn basis(n_qubits: usize, index: usize) -> Result<Self> {
        let dim = dimension_for(n_qubits).ok_or(TitanError::InvalidDimension {
            expected: None,
            actual: index,
        })?;
        if index >= dim {
            return Err(TitanError::InvalidDimension { expected: Some(dim), actual: index + 1 });
        }
        let mut data = DVector::from_element(dim, C64::new(0.0, 0.0));
        data[index] = C64::new(1.0, 0.0);
        Ok(Self { data })
    }

    /// Number of qubits, if the length is a power of two.
    pub fn num_qubits(&self) -> Option<usize> {
        let n = self.data.len();
        if n.is_power_of_two() { Some(n.trailing_zeros() as usize) } else { None }
    }

    pub fn norm(&self) -> f64 {
        self.data.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
    }

    /// |ψ⟩⟨ψ|
    pub fn density_matrix(&self) -> DMatrix<C64> {
        &self.data * self.data.adjoint()
    }

    /// Outcome distribution with bitstrings written highest qubit first.
    pub fn probabilities(&self) -> ProbabilityMap {
        let width = self.num_qubits().unwrap_or(0).max(1);
        let mut map = ProbabilityMap::default();
        for (index, amp) in self.data.iter().enumerate() {
            let p = amp.norm_sqr();
            if p > 0.0 {
                map.insert(format!("{:0width$b}", index, width = width), p);
            }
        }
        map
    }
}

/// `2^n_qubits`, or `None` when it does not fit in `usize`.
pub fn dimension_for(n_qubits: usize) -> Option<usize> {
    if n_qubits >= usize::BITS as usize { None } else { Some(1usize << n_qubits) }
}

/// Outcome bitstring -> probability. Absent outcomes have probability zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityMap {
    entries: BTreeMap<String, f64>,
}

impl ProbabilityMap {
    pub fn insert(&mut self, outcome: String, probability: f64) {
        self.entries.insert(outcome, probability);
    }

    pub fn probability_of(&self, outcome: &str) -> f64 {
        self.entries.get(outcome).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for ProbabilityMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl std::fmt::Display for ProbabilityMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{k}': {v:.6}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Clone, Debug)]
pub struct QOp {
    pub m: DMatrix<C64>,
}

impl QOp {
    pub fn try_new_unitary(m: DMatrix<C64>) -> Result<Self> {
        if m.nrows() != m.ncols() {
            return Err(TitanError::invalid_state("QOp must be square"));
        }
        // Unitarity: U^† U = I
        let u_dag_u = m.adjoint() * &m;
        let i = DMatrix::<C64>::identity(m.nrows(), m.ncols());
        let max_diff = (u_dag_u - i)
            .iter()
            .map(|z| z.norm())
            .fold(0.0_f64, f64::max);
        if max_diff > 1e-8 {
            return Err(TitanError::InvalidState(format!(
                "QOp not unitary (‖UᴴU−I‖∞={max_diff:e})"
            )));
        }
        Ok(Self { m })
    }

    /// Apply to a full state vector (dimensions must match).
    pub fn apply(&self, psi: &QState) -> Result<QState> {
        if self.m.ncols() != psi.data.len() {
            return Err(TitanError::InvalidDimension {
                expected: Some(self.m.ncols()),
                actual: psi.data.len(),
            });
        }
        Ok(QState { data: &self.m * &psi.data })
    }

    /// `other · self`: apply `self` first, then `other`.
    pub fn then(&self, other: &QOp) -> Result<QOp> {
        if self.m.nrows() != other.m.ncols() {
            return Err(TitanError::InvalidDimension {
                expected: Some(self.m.nrows()),
                actual: other.m.ncols(),
            });
        }
        Ok(QOp { m: &other.m * &self.m })
    }
}
