//! `qtune circuit`: gate listing plus the exact distribution at one angle.

use anyhow::Result;

use crate::core::titan::oracle::{BellCircuit, CircuitOracle};

pub fn main(angle_degrees: f64) -> Result<()> {
    let mut circuit = BellCircuit::new();
    print!("{}", circuit.listing(angle_degrees));
    let out = circuit.evaluate(angle_degrees.to_radians())?;
    println!("P = {}", out.probabilities);
    Ok(())
}
