//! Per-iteration diagnostics.

use super::types::StateMatrix;

/// Receives the energy and state after every dynamics iteration.
///
/// Closures `FnMut(usize, f64, &StateMatrix)` implement this trait, so a
/// caller can collect history inline:
///
/// ```
/// use u_hopfield::hopfield::{IterationObserver, StateMatrix};
///
/// let mut energies = Vec::new();
/// let mut observer = |_iter: usize, energy: f64, _state: &StateMatrix| energies.push(energy);
/// observer.on_iteration(1, -3.5, &StateMatrix::zeros(2));
/// assert_eq!(energies, vec![-3.5]);
/// ```
pub trait IterationObserver {
    /// Called once per completed iteration, 1-based, with the post-update
    /// energy and state.
    fn on_iteration(&mut self, iteration: usize, energy: f64, state: &StateMatrix);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    fn on_iteration(&mut self, _iteration: usize, _energy: f64, _state: &StateMatrix) {}
}

/// Emits a `tracing` debug event per iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl IterationObserver for TracingObserver {
    fn on_iteration(&mut self, iteration: usize, energy: f64, state: &StateMatrix) {
        tracing::debug!(
            iteration,
            energy,
            active = state.active_count(),
            permutation = state.is_permutation(),
            "hopfield iteration"
        );
    }
}

impl<F> IterationObserver for F
where
    F: FnMut(usize, f64, &StateMatrix),
{
    fn on_iteration(&mut self, iteration: usize, energy: f64, state: &StateMatrix) {
        self(iteration, energy, state)
    }
}
