//! Hopfield dynamics.
//!
//! Two update rules, kept separate because they differ in both input and
//! threshold:
//!
//! | Rule | Net input | Fires when | Update order |
//! |---|---|---|---|
//! | synchronous | `Σ W[a][b]·s[b]` | `input >= -C·N` | all neurons from one snapshot |
//! | explicit | constraint + distance terms | `input > 0` | in place, row-major |
//!
//! The explicit rule writes each neuron as soon as it is computed, so later
//! neurons in the same sweep see earlier updates. The synchronous rule never
//! does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::Level;

use super::config::HopfieldConfig;
use super::energy::{breakdown_unchecked, general_unchecked};
use super::observer::{IterationObserver, NoopObserver};
use super::types::{Coefficients, StateMatrix};
use super::weights::WeightMatrix;
use crate::error::Result;
use crate::tsp::TspInstance;

/// Why a dynamics run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Energy change fell below the threshold (synchronous), or a sweep
    /// changed no neuron (explicit).
    Converged,
    /// The iteration or sweep budget ran out first.
    IterationLimit,
    /// Stopped by the cancellation flag.
    Cancelled,
}

/// Result of a dynamics run.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicsOutcome {
    /// Last computed state. For a converged synchronous run this is the
    /// post-update state of the final step.
    pub state: StateMatrix,

    /// Completed update steps (synchronous) or sweeps (explicit).
    pub iterations: usize,

    pub termination: Termination,

    /// Energy of `state`: general form for the synchronous rule, explicit
    /// form for the explicit rule.
    pub final_energy: f64,

    /// Energy before the first step followed by the energy after each step.
    pub energy_history: Vec<f64>,
}

impl DynamicsOutcome {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Executes Hopfield dynamics.
pub struct HopfieldRunner;

impl HopfieldRunner {
    /// Random `n × n` state with on average `n` active neurons, seeded from
    /// `config.seed`.
    pub fn random_state(n: usize, config: &HopfieldConfig) -> StateMatrix {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let p = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        StateMatrix::random(n, p, &mut rng)
    }

    /// Runs the synchronous weight-driven rule until the energy settles or
    /// `config.max_iterations` steps have been taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hopfield::hopfield::{Coefficients, HopfieldConfig, HopfieldRunner, StateMatrix, WeightMatrix};
    /// use u_hopfield::tsp::{City, TspInstance};
    ///
    /// let inst = TspInstance::new(vec![
    ///     City::new("a", 0.0, 0.0),
    ///     City::new("b", 1.0, 0.0),
    ///     City::new("c", 1.0, 1.0),
    /// ]).unwrap();
    /// let config = HopfieldConfig::default()
    ///     .with_coefficients(Coefficients::new(1.0, 1.0, 1.0, 1.0))
    ///     .with_max_iterations(50);
    /// let weights = WeightMatrix::build(&inst, &config.coefficients);
    /// let outcome = HopfieldRunner::run_synchronous(&weights, StateMatrix::zeros(3), &config).unwrap();
    /// assert!(outcome.iterations <= 50);
    /// ```
    pub fn run_synchronous(
        weights: &WeightMatrix,
        initial: StateMatrix,
        config: &HopfieldConfig,
    ) -> Result<DynamicsOutcome> {
        Self::run_synchronous_with_cancel(weights, initial, config, &mut NoopObserver, None)
    }

    /// Synchronous rule reporting every step to `observer`.
    pub fn run_synchronous_observed<O: IterationObserver>(
        weights: &WeightMatrix,
        initial: StateMatrix,
        config: &HopfieldConfig,
        observer: &mut O,
    ) -> Result<DynamicsOutcome> {
        Self::run_synchronous_with_cancel(weights, initial, config, observer, None)
    }

    /// Synchronous rule with an optional cancellation flag, checked before
    /// each step.
    pub fn run_synchronous_with_cancel<O: IterationObserver>(
        weights: &WeightMatrix,
        initial: StateMatrix,
        config: &HopfieldConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<DynamicsOutcome> {
        config.validate()?;
        weights.check_dimension(initial.n())?;
        let k = &config.coefficients;

        tracing::debug!(
            n = initial.n(),
            max_iterations = config.max_iterations,
            threshold = config.convergence_threshold,
            "starting synchronous dynamics"
        );

        let mut current = initial;
        let mut energy = general_unchecked(&current, weights, k);
        let mut energy_history = Vec::with_capacity(config.max_iterations.min(1024) + 1);
        energy_history.push(energy);

        let mut iterations = 0usize;
        let mut termination = Termination::IterationLimit;

        while iterations < config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    termination = Termination::Cancelled;
                    break;
                }
            }

            let next = synchronous_unchecked(weights, &current, k, config.parallel);
            let next_energy = general_unchecked(&next, weights, k);
            let change = (next_energy - energy).abs();
            iterations += 1;

            tracing::trace!(iteration = iterations, energy = next_energy, change, "synchronous step");
            observer.on_iteration(iterations, next_energy, &next);
            energy_history.push(next_energy);

            current = next;
            energy = next_energy;

            if change < config.convergence_threshold {
                termination = Termination::Converged;
                break;
            }
        }

        log_termination("synchronous", termination, iterations, energy);

        Ok(DynamicsOutcome {
            state: current,
            iterations,
            termination,
            final_energy: energy,
            energy_history,
        })
    }

    /// One synchronous update: every neuron is recomputed from `state`.
    pub fn synchronous_step(
        weights: &WeightMatrix,
        state: &StateMatrix,
        coefficients: &Coefficients,
        parallel: bool,
    ) -> Result<StateMatrix> {
        weights.check_dimension(state.n())?;
        Ok(synchronous_unchecked(weights, state, coefficients, parallel))
    }

    /// Runs the explicit-form rule for up to `config.explicit_sweeps`
    /// in-place sweeps.
    pub fn run_explicit(
        instance: &TspInstance,
        initial: StateMatrix,
        config: &HopfieldConfig,
    ) -> Result<DynamicsOutcome> {
        Self::run_explicit_observed(instance, initial, config, &mut NoopObserver)
    }

    /// Explicit-form rule reporting every sweep to `observer`.
    pub fn run_explicit_observed<O: IterationObserver>(
        instance: &TspInstance,
        initial: StateMatrix,
        config: &HopfieldConfig,
        observer: &mut O,
    ) -> Result<DynamicsOutcome> {
        config.validate()?;
        initial.check_dimension(instance.len())?;
        let k = &config.coefficients;

        tracing::debug!(
            n = instance.len(),
            sweeps = config.explicit_sweeps,
            "starting explicit dynamics"
        );

        let mut state = initial;
        let mut energy = breakdown_unchecked(instance, &state, k).total();
        let mut energy_history = vec![energy];
        let mut iterations = 0usize;
        let mut termination = Termination::IterationLimit;

        while iterations < config.explicit_sweeps {
            let changed = sweep_unchecked(instance, &mut state, k);
            energy = breakdown_unchecked(instance, &state, k).total();
            iterations += 1;

            tracing::trace!(sweep = iterations, energy, changed, "explicit sweep");
            observer.on_iteration(iterations, energy, &state);
            energy_history.push(energy);

            if changed == 0 {
                termination = Termination::Converged;
                break;
            }
        }

        log_termination("explicit", termination, iterations, energy);

        Ok(DynamicsOutcome {
            state,
            iterations,
            termination,
            final_energy: energy,
            energy_history,
        })
    }

    /// One in-place sweep of the explicit rule in row-major order.
    ///
    /// Returns the number of neurons whose value changed. `D` does not
    /// enter the input; distances are applied unscaled.
    pub fn explicit_sweep(
        instance: &TspInstance,
        state: &mut StateMatrix,
        coefficients: &Coefficients,
    ) -> Result<usize> {
        state.check_dimension(instance.len())?;
        Ok(sweep_unchecked(instance, state, coefficients))
    }
}

fn synchronous_unchecked(
    weights: &WeightMatrix,
    state: &StateMatrix,
    coefficients: &Coefficients,
    parallel: bool,
) -> StateMatrix {
    let n = state.n();
    let threshold = -coefficients.c * n as f64;
    let s = state.as_slice();
    let fire = |a: usize| {
        let input: f64 = weights
            .row(a)
            .iter()
            .zip(s)
            .filter(|&(_, &v)| v == 1)
            .map(|(w, _)| w)
            .sum();
        input >= threshold
    };

    let cells = map_neurons(n * n, parallel, fire);
    let mut next = StateMatrix::zeros(n);
    for (a, active) in cells.into_iter().enumerate() {
        next.set(a / n, a % n, active);
    }
    next
}

fn sweep_unchecked(instance: &TspInstance, state: &mut StateMatrix, k: &Coefficients) -> usize {
    let n = instance.len();
    let mut total = state.active_count() as f64;
    let mut changed = 0;

    for x in 0..n {
        for i in 0..n {
            let mut input = 0.0;
            for j in (0..n).filter(|&j| j != i) {
                input += k.a * f64::from(state.get(x, j));
            }
            for y in (0..n).filter(|&y| y != x) {
                input += k.b * f64::from(state.get(y, i));
                let neighbours = state.get(y, (i + n - 1) % n) + state.get(y, (i + 1) % n);
                input += instance.distance(x, y) * f64::from(neighbours);
            }
            input += k.c * (total - n as f64);

            let was_active = state.get(x, i) == 1;
            let active = input > 0.0;
            if active != was_active {
                state.set(x, i, active);
                total += if active { 1.0 } else { -1.0 };
                changed += 1;
            }
        }
    }
    changed
}

/// Warn for a synchronous run stopped by its iteration cap, debug otherwise.
/// The explicit rule's sweep budget is a single pass by default.
fn termination_level(rule: &str, termination: Termination) -> Level {
    match (rule, termination) {
        ("synchronous", Termination::IterationLimit) => Level::WARN,
        _ => Level::DEBUG,
    }
}

fn log_termination(rule: &str, termination: Termination, iterations: usize, energy: f64) {
    if termination_level(rule, termination) == Level::WARN {
        tracing::warn!(rule, iterations, energy, "dynamics stopped at iteration limit");
    } else {
        tracing::debug!(rule, ?termination, iterations, energy, "dynamics finished");
    }
}

#[cfg(feature = "parallel")]
fn map_neurons<F>(count: usize, parallel: bool, f: F) -> Vec<bool>
where
    F: Fn(usize) -> bool + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().map(f).collect()
    } else {
        (0..count).map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_neurons<F>(count: usize, _parallel: bool, f: F) -> Vec<bool>
where
    F: Fn(usize) -> bool,
{
    (0..count).map(f).collect()
}
