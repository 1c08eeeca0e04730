//! Traveling Salesman Problem solver built on a discrete Hopfield network.
//!
//! - [`tsp`]: cities, problem instances, tours and tour length.
//! - [`hopfield`]: weight matrix, energy functions, the synchronous and
//!   explicit update rules, decoding, and an end-to-end solver.
//!
//! # Example
//!
//! ```
//! use u_hopfield::hopfield::{Coefficients, HopfieldConfig, HopfieldSolver, StateMatrix};
//! use u_hopfield::tsp::{City, TspInstance};
//!
//! let instance = TspInstance::new(vec![City::new("only", 0.0, 0.0)]).unwrap();
//! let config = HopfieldConfig::default()
//!     .with_coefficients(Coefficients::new(1.0, 1.0, 1.0, 1.0));
//! let initial = StateMatrix::from_order(&[0]).unwrap();
//! let solution = HopfieldSolver::solve(&instance, initial, &config).unwrap();
//! assert_eq!(solution.length, 0.0);
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon-backed weight construction and net-input sums
//!   (enable per run with [`HopfieldConfig::with_parallel`](hopfield::HopfieldConfig::with_parallel)).
//! - `serde`: `Serialize`/`Deserialize` for cities, tours, coefficients,
//!   states and configuration.

pub mod error;
pub mod hopfield;
pub mod tsp;

pub use error::{HopfieldError, Result};
