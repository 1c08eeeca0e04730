//! End-to-end pipeline: weights, dynamics, decoding, tour length.

use super::config::HopfieldConfig;
use super::decode::decode;
use super::observer::{IterationObserver, NoopObserver};
use super::runner::{DynamicsOutcome, HopfieldRunner};
use super::types::StateMatrix;
use super::weights::WeightMatrix;
use crate::error::{HopfieldError, Result};
use crate::tsp::{TspInstance, Tour};

/// A decoded tour and the dynamics run that produced it.
#[derive(Debug, Clone)]
pub struct Solution {
    pub tour: Tour,
    /// Closed-cycle length of `tour`.
    pub length: f64,
    pub outcome: DynamicsOutcome,
}

/// Solves a TSP instance with the synchronous Hopfield rule.
///
/// No retries are made. When the final state is not a permutation the run
/// comes back inside [`HopfieldError::UnsolvedRun`] and the caller decides
/// whether to rerun with other coefficients or another initial state.
pub struct HopfieldSolver;

impl HopfieldSolver {
    /// Builds the weights, runs synchronous dynamics from `initial`, and
    /// decodes the final state.
    pub fn solve(
        instance: &TspInstance,
        initial: StateMatrix,
        config: &HopfieldConfig,
    ) -> Result<Solution> {
        Self::solve_observed(instance, initial, config, &mut NoopObserver)
    }

    pub fn solve_observed<O: IterationObserver>(
        instance: &TspInstance,
        initial: StateMatrix,
        config: &HopfieldConfig,
        observer: &mut O,
    ) -> Result<Solution> {
        config.validate()?;
        initial.check_dimension(instance.len())?;

        let weights = WeightMatrix::build_with(instance, &config.coefficients, config.parallel);
        let outcome = HopfieldRunner::run_synchronous_observed(&weights, initial, config, observer)?;
        let tour = match decode(instance, &outcome.state) {
            Ok(tour) => tour,
            Err(HopfieldError::InvalidTour { violations }) => {
                return Err(HopfieldError::UnsolvedRun {
                    violations,
                    outcome: Box::new(outcome),
                });
            }
            Err(other) => return Err(other),
        };
        let length = tour.length(instance);

        tracing::info!(
            n = instance.len(),
            iterations = outcome.iterations,
            length,
            "hopfield tour decoded"
        );

        Ok(Solution {
            tour,
            length,
            outcome,
        })
    }
}
