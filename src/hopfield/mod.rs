//! Discrete Hopfield network for the TSP.
//!
//! Neuron `(X, i)` is active when city `X` is visited at tour position `i`.
//! The weight matrix encodes the tour constraints and distance costs so that
//! low-energy stable states are short valid tours. A run goes
//!
//! 1. [`WeightMatrix::build`] from a [`TspInstance`](crate::tsp::TspInstance)
//!    and [`Coefficients`]
//! 2. [`HopfieldRunner`] dynamics from an initial [`StateMatrix`]
//! 3. [`decode`] the final state into a [`Tour`](crate::tsp::Tour)
//!
//! [`HopfieldSolver`] chains the three.
//!
//! Convergence to a valid or short tour is not guaranteed; the result of a
//! run depends on the coefficients and the initial state.
//!
//! # References
//!
//! - Hopfield & Tank (1985), "Neural computation of decisions in optimization problems"
//! - Wilson & Pawley (1988), "On the stability of the Travelling Salesman Problem
//!   algorithm of Hopfield and Tank"

mod config;
mod decode;
mod energy;
mod observer;
mod runner;
mod solver;
mod types;
mod weights;

pub use config::HopfieldConfig;
pub use decode::{decode, decode_partial};
pub use energy::{adjacency_cost, explicit_breakdown, explicit_energy, general_energy, EnergyBreakdown};
pub use observer::{IterationObserver, NoopObserver, TracingObserver};
pub use runner::{DynamicsOutcome, HopfieldRunner, Termination};
pub use solver::{HopfieldSolver, Solution};
pub use types::{Coefficients, PermutationViolation, StateMatrix};
pub use weights::WeightMatrix;
