use qtune::core::titan::oracle::BellCircuit;

#[test]
fn bell_circuit_listing() {
    let listing = BellCircuit::new().listing(90.0);
    insta::assert_snapshot!(listing.trim_end(), @r"
    q0: |0⟩─RY(90.00°)─░───●───░─
    q1: |0⟩────────────░───X───░─
    ");
}
