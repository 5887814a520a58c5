//! Kronecker products and controlled lifts.
use crate::core::error::{Result, TitanError};
use crate::core::titan::gates;
use crate::core::titan::types::{dimension_for, QOp};
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Kronecker product A ⊗ B
pub fn kron(a: &DMatrix<C64>, b: &DMatrix<C64>) -> DMatrix<C64> {
    let (ar, ac) = (a.nrows(), a.ncols());
    let (br, bc) = (b.nrows(), b.ncols());
    let mut out = DMatrix::<C64>::from_element(ar * br, ac * bc, c(0.0, 0.0));
    for i in 0..ar {
        for j in 0..ac {
            let aij = a[(i, j)];
            for k in 0..br {
                for l in 0..bc {
                    out[(i * br + k, j * bc + l)] = aij * b[(k, l)];
                }
            }
        }
    }
    out
}

/// Promote a 1-qubit gate `u` onto `n_qubits`, targeting `target` index (0 = least significant).
pub fn lift_1q(u: &DMatrix<C64>, n_qubits: usize, target: usize) -> Result<QOp> {
    if u.nrows() != 2 || u.ncols() != 2 {
        return Err(TitanError::InvalidDimension { expected: Some(2), actual: u.nrows() });
    }
    if target >= n_qubits {
        return Err(TitanError::InvalidConfig(format!(
            "target qubit {target} out of range for {n_qubits} qubits"
        )));
    }

    // Highest qubit is the leftmost kron factor so that qubit q maps to bit q.
    let i2 = gates::i2();
    let mut acc = DMatrix::<C64>::from_element(1, 1, c(1.0, 0.0));
    for q in (0..n_qubits).rev() {
        let m = if q == target { u } else { &i2 };
        acc = kron(&acc, m);
    }
    Ok(QOp { m: acc })
}

/// Build an n-qubit CNOT as a full 2^n unitary (control -> target).
pub fn cnot_n(n_qubits: usize, control: usize, target: usize) -> Result<QOp> {
    if control >= n_qubits || target >= n_qubits || control == target {
        return Err(TitanError::InvalidConfig(format!(
            "invalid CNOT({control} -> {target}) on {n_qubits} qubits"
        )));
    }
    let dim = dimension_for(n_qubits)
        .ok_or(TitanError::InvalidDimension { expected: None, actual: n_qubits })?;
    let mut m = DMatrix::<C64>::from_element(dim, dim, c(0.0, 0.0));
    for basis in 0..dim {
        let bit_c = (basis >> control) & 1;
        let mut out = basis;
        if bit_c == 1 {
            // flip target bit
            out ^= 1usize << target;
        }
        m[(out, basis)] = c(1.0, 0.0);
    }
    Ok(QOp { m })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::titan::types::QState;
    use std::f64::consts::PI;

    #[test]
    fn lift_targets_the_requested_bit() {
        let x0 = lift_1q(&gates::ry(PI), 2, 0).unwrap();
        let out = x0.apply(&QState::basis(2, 0b00).unwrap()).unwrap();
        assert!((out.data[0b01].re - 1.0).abs() < 1e-12);

        let x1 = lift_1q(&gates::ry(PI), 2, 1).unwrap();
        let out = x1.apply(&QState::basis(2, 0b00).unwrap()).unwrap();
        assert!((out.data[0b10].re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cnot_flips_target_when_control_set() {
        let cx = cnot_n(2, 0, 1).unwrap();
        let out = cx.apply(&QState::basis(2, 0b01).unwrap()).unwrap();
        assert!((out.data[0b11].re - 1.0).abs() < 1e-12);
        let out = cx.apply(&QState::basis(2, 0b10).unwrap()).unwrap();
        assert!((out.data[0b10].re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cnot_rejects_same_control_and_target() {
        assert!(cnot_n(2, 1, 1).is_err());
        assert!(lift_1q(&gates::ry(0.1), 2, 2).is_err());
    }
}
