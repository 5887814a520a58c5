use qtune::core::titan::cost::CostKind;
use qtune::core::error::TitanError;
use qtune::core::titan::optimization::{
    GradientDescentOptimizer, OptimizationOutcome, OptimizerSettings, OptimizerState,
};
use qtune::core::titan::oracle::BellCircuit;

fn run(settings: OptimizerSettings, angle: f64) -> OptimizationOutcome {
    GradientDescentOptimizer::new(settings, angle)
        .expect("settings")
        .optimize(&mut BellCircuit::new())
        .expect("run")
}

#[test]
fn bell_run_from_zero_degrees_approaches_equal_superposition() {
    let settings = OptimizerSettings {
        learning_rate: 1.29,
        cost: CostKind::Mse,
        ..OptimizerSettings::default()
    };
    let out = run(settings, 0.0);

    assert_eq!(out.iterations(), 500);
    assert_eq!(out.state, OptimizerState::MaxIterationsReached);

    // mse is never negative, so the angle walks toward -90°.
    let angles: Vec<f64> = out.trace.iter().map(|r| r.angle).collect();
    assert!(angles.windows(2).all(|w| w[1] <= w[0]));
    assert!(
        out.final_angle < -80.0 && out.final_angle > -90.0,
        "final angle {}",
        out.final_angle
    );

    let losses: Vec<f64> = out.losses().collect();
    assert_eq!(losses[0], 1.0);
    assert!(losses.windows(2).all(|w| w[1] <= w[0] + 1e-12));
    assert!(*losses.last().unwrap() < 0.02);

    let p00 = out.final_probabilities.probability_of("00");
    let p11 = out.final_probabilities.probability_of("11");
    assert!((p00 - p11).abs() < 0.15, "p00={p00} p11={p11}");
}

#[test]
fn full_register_entropy_stays_zero_for_exact_states() {
    let settings = OptimizerSettings {
        learning_rate: 1.29,
        max_iterations: 50,
        ..OptimizerSettings::default()
    };
    let out = run(settings, 0.0);
    assert!(out.entropies().all(|s| s.abs() < 1e-9));
    // The purity score still moves as the state becomes entangled.
    let first = out.trace.first().unwrap().entanglement;
    let last = out.trace.last().unwrap().entanglement;
    assert!(first < 1e-9 && last > first);
}

#[test]
fn every_learning_rate_terminates_within_bound() {
    for lr in [-50.0, -1.0, 0.0, 0.01, 1.29, 3.2, 1.0e6] {
        let settings = OptimizerSettings {
            learning_rate: lr,
            max_iterations: 120,
            ..OptimizerSettings::default()
        };
        let out = run(settings, 10.0);
        assert!(out.iterations() <= 120, "lr={lr}");
        assert!(out.state.is_terminal());
    }
}

#[test]
fn positive_precision_stops_once_steps_are_small() {
    let settings = OptimizerSettings {
        learning_rate: 1.29,
        precision: 0.05,
        ..OptimizerSettings::default()
    };
    let out = run(settings, 0.0);
    assert_eq!(out.state, OptimizerState::Converged);
    assert!(out.iterations() < 500);
    let last = out.trace.last().unwrap();
    assert!((last.angle - out.final_angle).abs() <= 0.05);
}

#[test]
fn precision_at_or_above_initial_step_is_a_config_error() {
    for precision in [1.0, 5.0, f64::INFINITY] {
        let settings = OptimizerSettings { precision, ..OptimizerSettings::default() };
        let err = GradientDescentOptimizer::new(settings, 0.0)
            .expect("settings")
            .optimize(&mut BellCircuit::new())
            .unwrap_err();
        assert!(matches!(err, TitanError::InvalidConfig(_)), "precision={precision}: {err}");
    }
}
