//! Cost policies over the probabilities of two designated outcomes.
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CostKind {
    /// (p_a - p_b)^2
    #[default]
    Mse,
    /// p_b - (p_a + p_b)/2
    Unsymmetrical,
}

impl CostKind {
    pub fn evaluate(self, p_a: f64, p_b: f64) -> f64 {
        match self {
            CostKind::Mse => mse(p_a, p_b),
            CostKind::Unsymmetrical => unsymmetrical(p_a, p_b),
        }
    }
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostKind::Mse => write!(f, "mse"),
            CostKind::Unsymmetrical => write!(f, "unsymmetrical"),
        }
    }
}

pub fn mse(p_a: f64, p_b: f64) -> f64 {
    (p_a - p_b).powi(2)
}

pub fn unsymmetrical(p_a: f64, p_b: f64) -> f64 {
    p_b - (p_a + p_b) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_is_symmetric() {
        for &(a, b) in &[(0.0, 1.0), (0.25, 0.7), (0.5, 0.5), (0.9, 0.05)] {
            assert_eq!(mse(a, b), mse(b, a));
        }
        assert!((mse(1.0, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unsymmetrical_vanishes_on_equal_mass() {
        for &p in &[0.0, 0.1, 0.5, 1.0] {
            assert_eq!(unsymmetrical(p, p), 0.0);
        }
        assert!((unsymmetrical(0.0, 1.0) - 0.5).abs() < 1e-12);
        assert!((unsymmetrical(1.0, 0.0) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn display_matches_config_names() {
        assert_eq!(CostKind::Mse.to_string(), "mse");
        assert_eq!(CostKind::Unsymmetrical.to_string(), "unsymmetrical");
    }
}
