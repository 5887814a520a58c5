//! Single-qubit gate matrices used by the circuits.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

pub fn i2() -> DMatrix<C64> {
    DMatrix::identity(2, 2)
}
/// RY(θ) = [[cos θ/2, -sin θ/2], [sin θ/2, cos θ/2]], θ in radians.
pub fn ry(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(-s0, 0.0), c(s0, 0.0), c(c0, 0.0)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::titan::types::QOp;

    #[test]
    fn standard_gates_are_unitary() {
        for g in [i2(), ry(0.3), ry(-2.0), ry(std::f64::consts::PI)] {
            assert!(QOp::try_new_unitary(g).is_ok());
        }
    }

    #[test]
    fn ry_pi_flips_zero_to_one() {
        let m = ry(std::f64::consts::PI);
        assert!(m[(0, 0)].norm() < 1e-12);
        assert!((m[(1, 0)].re - 1.0).abs() < 1e-12);
    }
}
