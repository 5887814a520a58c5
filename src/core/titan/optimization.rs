//! Single-angle gradient descent over a circuit oracle.
//!
//! Each epoch evaluates the oracle at the current angle, records loss and entropy,
//! then steps `angle -= learning_rate * loss`. The loss itself is used as the step
//! magnitude; there is no separate gradient estimate.
//!
//! The loop runs while `iterations < max_iterations && step_size > precision`.
//! With the default `precision = -1.0` the step-size test never fails, so only
//! `max_iterations` ends the run. A non-negative precision enables a real
//! convergence stop.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TitanError};
use crate::core::titan::{
    cost::CostKind,
    entanglement::{entanglement_entropy, meyer_wallach_state, von_neumann_entropy},
    oracle::CircuitOracle,
    types::{ProbabilityMap, QState},
};
use crate::debug_log;

pub const DEFAULT_MAX_ITERATIONS: usize = 500;
pub const DEFAULT_PRECISION: f64 = -1.0;
pub const DEFAULT_LEARNING_RATE: f64 = 2.0;
/// Step size the loop test sees before the first epoch.
pub const INITIAL_STEP_SIZE: f64 = 1.0;

/// Which density matrix the per-epoch entropy is taken from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EntropyTarget {
    /// |ψ⟩⟨ψ| of the whole register.
    #[default]
    Full,
    /// Reduced state of qubit 0.
    #[value(name = "qubit0")]
    Qubit0,
    /// Reduced state of qubit 1.
    #[value(name = "qubit1")]
    Qubit1,
}

impl EntropyTarget {
    pub fn entropy_of(self, psi: &QState) -> Result<f64> {
        match self {
            EntropyTarget::Full => von_neumann_entropy(&psi.density_matrix()),
            EntropyTarget::Qubit0 => entanglement_entropy(psi, 0),
            EntropyTarget::Qubit1 => entanglement_entropy(psi, 1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub learning_rate: f64,
    pub cost: CostKind,
    pub max_iterations: usize,
    pub precision: f64,
    pub outcome_a: String,
    pub outcome_b: String,
    pub entropy: EntropyTarget,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            cost: CostKind::Mse,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            precision: DEFAULT_PRECISION,
            outcome_a: "00".to_string(),
            outcome_b: "11".to_string(),
            entropy: EntropyTarget::Full,
        }
    }
}

impl OptimizerSettings {
    /// Rejects settings the loop cannot run with. `n_qubits` sizes the outcome bitstrings.
    pub fn validate(&self, n_qubits: usize) -> Result<()> {
        if !self.learning_rate.is_finite() {
            return Err(TitanError::config("learning rate must be finite"));
        }
        if self.precision.is_nan() {
            return Err(TitanError::config(
                "precision must be a number (negative disables the step-size stop)",
            ));
        }
        if self.precision >= INITIAL_STEP_SIZE {
            return Err(TitanError::InvalidConfig(format!(
                "precision {} would stop the run before the first epoch (must be below {})",
                self.precision, INITIAL_STEP_SIZE
            )));
        }
        if self.max_iterations == 0 {
            return Err(TitanError::config("max_iterations must be at least 1"));
        }
        for outcome in [&self.outcome_a, &self.outcome_b] {
            if outcome.len() != n_qubits || !outcome.chars().all(|c| c == '0' || c == '1') {
                return Err(TitanError::InvalidConfig(format!(
                    "outcome '{outcome}' is not a {n_qubits}-bit string"
                )));
            }
        }
        if self.outcome_a == self.outcome_b {
            return Err(TitanError::config("designated outcomes must differ"));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizerState {
    Running,
    Converged,
    MaxIterationsReached,
}

impl OptimizerState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OptimizerState::Running)
    }
}

/// One epoch: the angle that was evaluated and what it produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub epoch: usize,
    pub angle: f64,
    pub loss: f64,
    pub entropy: f64,
    /// Averaged-purity score of the same state; not used by the update.
    pub entanglement: f64,
}

#[derive(Clone, Debug)]
pub struct OptimizationOutcome {
    pub final_angle: f64,
    pub final_probabilities: ProbabilityMap,
    pub final_state: QState,
    pub state: OptimizerState,
    pub trace: Vec<TraceRecord>,
}

impl OptimizationOutcome {
    pub fn iterations(&self) -> usize {
        self.trace.len()
    }

    pub fn epochs(&self) -> impl Iterator<Item = usize> + '_ {
        self.trace.iter().map(|r| r.epoch)
    }

    pub fn losses(&self) -> impl Iterator<Item = f64> + '_ {
        self.trace.iter().map(|r| r.loss)
    }

    pub fn entropies(&self) -> impl Iterator<Item = f64> + '_ {
        self.trace.iter().map(|r| r.entropy)
    }
}

pub struct GradientDescentOptimizer {
    settings: OptimizerSettings,
    angle: f64,
    step_size: f64,
    epoch: usize,
    state: OptimizerState,
    trace: Vec<TraceRecord>,
    last: Option<(ProbabilityMap, QState)>,
}

impl GradientDescentOptimizer {
    pub fn new(settings: OptimizerSettings, initial_angle_degrees: f64) -> Result<Self> {
        if !initial_angle_degrees.is_finite() {
            return Err(TitanError::config("initial angle must be finite"));
        }
        Ok(Self {
            settings,
            angle: initial_angle_degrees,
            step_size: INITIAL_STEP_SIZE,
            epoch: 0,
            state: OptimizerState::Running,
            trace: Vec::new(),
            last: None,
        })
    }

    /// Top-of-loop test; moves to a terminal state when either condition fails.
    fn check_continue(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        if !(self.step_size > self.settings.precision) {
            self.state = OptimizerState::Converged;
        } else if self.trace.len() >= self.settings.max_iterations {
            self.state = OptimizerState::MaxIterationsReached;
        }
        !self.state.is_terminal()
    }

    /// One epoch. Only reached through [`Self::optimize`], after validation and the loop test.
    fn step<O: CircuitOracle + ?Sized>(&mut self, oracle: &mut O) -> Result<()> {
        let theta = self.angle.to_radians();
        let out = oracle.evaluate(theta)?;
        debug_log!(
            "[optimizer] epoch {} angle {:.6}° -> {}",
            self.epoch + 1,
            self.angle,
            out.probabilities
        );

        let p_a = out.probabilities.probability_of(&self.settings.outcome_a);
        let p_b = out.probabilities.probability_of(&self.settings.outcome_b);
        let entropy = self.settings.entropy.entropy_of(&out.state)?;
        let entanglement = meyer_wallach_state(&out.state)?;
        let loss = self.settings.cost.evaluate(p_a, p_b);

        let previous = self.angle;
        self.angle = previous - self.settings.learning_rate * loss;
        self.step_size = (self.angle - previous).abs();
        self.epoch += 1;

        self.trace.push(TraceRecord {
            epoch: self.epoch,
            angle: previous,
            loss,
            entropy,
            entanglement,
        });
        self.last = Some((out.probabilities, out.state));
        Ok(())
    }

    /// Runs to a terminal state. Oracle or measure errors abort the run.
    pub fn optimize<O: CircuitOracle + ?Sized>(
        mut self,
        oracle: &mut O,
    ) -> Result<OptimizationOutcome> {
        self.settings.validate(oracle.num_qubits())?;
        while self.check_continue() {
            self.step(oracle)?;
        }
        debug_log!(
            "[optimizer] {:?} after {} epochs, angle {:.9}°",
            self.state,
            self.epoch,
            self.angle
        );

        // validate() keeps precision below the initial step and max_iterations >= 1.
        let (final_probabilities, final_state) = self
            .last
            .ok_or_else(|| TitanError::config("optimizer stopped before the first epoch"))?;
        Ok(OptimizationOutcome {
            final_angle: self.angle,
            final_probabilities,
            final_state,
            state: self.state,
            trace: self.trace,
        })
    }
}
