//! Error types for the Hopfield TSP solver.

use thiserror::Error;

use crate::hopfield::{DynamicsOutcome, PermutationViolation};

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, HopfieldError>;

/// Errors raised before or after a Hopfield run.
///
/// Running out of iterations is not an error; it is reported through
/// [`Termination`](crate::hopfield::Termination) on the dynamics outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HopfieldError {
    /// The instance has no cities.
    #[error("instance must contain at least one city")]
    EmptyInstance,

    /// A matrix does not match the instance size.
    #[error("{what}: expected dimension {expected}, got {actual}")]
    DimensionMismatch {
        /// Which input was mis-sized.
        what: &'static str,
        /// Dimension implied by the instance.
        expected: usize,
        /// Dimension actually supplied.
        actual: usize,
    },

    /// A state matrix entry is neither 0 nor 1.
    #[error("state entry ({row}, {col}) is {value}, expected 0 or 1")]
    NonBinaryState {
        /// City index of the offending entry.
        row: usize,
        /// Tour position of the offending entry.
        col: usize,
        /// The value found there.
        value: u8,
    },

    /// Configuration rejected by [`HopfieldConfig::validate`](crate::hopfield::HopfieldConfig::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The final state does not encode a tour.
    #[error("state is not a permutation matrix ({} violation(s))", violations.len())]
    InvalidTour {
        /// Every row/column defect found in the state.
        violations: Vec<PermutationViolation>,
    },

    /// A solver run finished on a state that does not encode a tour.
    ///
    /// The run itself is kept so callers can inspect how it ended and
    /// restart from its final state.
    #[error(
        "run ended ({:?} after {} iteration(s)) without a tour: {} violation(s)",
        outcome.termination,
        outcome.iterations,
        violations.len()
    )]
    UnsolvedRun {
        /// Every row/column defect found in the final state.
        violations: Vec<PermutationViolation>,
        /// The dynamics run that produced the state.
        outcome: Box<DynamicsOutcome>,
    },
}
