//! Hopfield run configuration.

use super::types::Coefficients;
use crate::error::{HopfieldError, Result};

/// Configuration for a Hopfield TSP run.
///
/// # Examples
///
/// ```
/// use u_hopfield::hopfield::{Coefficients, HopfieldConfig};
///
/// let config = HopfieldConfig::default()
///     .with_coefficients(Coefficients::new(500.0, 500.0, 200.0, 500.0))
///     .with_convergence_threshold(1e-3)
///     .with_max_iterations(200)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_iterations, 200);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HopfieldConfig {
    /// Energy coefficients A, B, C, D.
    pub coefficients: Coefficients,

    /// The synchronous rule stops once `|E_after - E_before|` drops below this.
    pub convergence_threshold: f64,

    /// Hard cap on synchronous update steps.
    pub max_iterations: usize,

    /// In-place sweeps performed by the explicit rule.
    ///
    /// A sweep that changes no neuron ends the run early.
    pub explicit_sweeps: usize,

    /// Fill weight rows and net inputs in parallel with rayon.
    ///
    /// Ignored unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Seed for [`HopfieldRunner::random_state`](super::HopfieldRunner::random_state).
    pub seed: Option<u64>,
}

impl Default for HopfieldConfig {
    fn default() -> Self {
        Self {
            coefficients: Coefficients::default(),
            convergence_threshold: 1e-6,
            max_iterations: 1000,
            explicit_sweeps: 1,
            parallel: false,
            seed: None,
        }
    }
}

impl HopfieldConfig {
    pub fn with_coefficients(mut self, coefficients: Coefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_explicit_sweeps(mut self, n: usize) -> Self {
        self.explicit_sweeps = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.coefficients.validate()?;
        if !(self.convergence_threshold.is_finite() && self.convergence_threshold > 0.0) {
            return Err(HopfieldError::InvalidConfig(format!(
                "convergence_threshold must be positive, got {}",
                self.convergence_threshold
            )));
        }
        if self.max_iterations == 0 {
            return Err(HopfieldError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }
        if self.explicit_sweeps == 0 {
            return Err(HopfieldError::InvalidConfig(
                "explicit_sweeps must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
