//! Turning a stable state into a tour.

use super::types::StateMatrix;
use crate::error::{HopfieldError, Result};
use crate::tsp::{TspInstance, Tour};

/// Decodes a permutation state into a [`Tour`].
///
/// Fails with [`HopfieldError::InvalidTour`] listing every row and column
/// that does not hold exactly one active neuron.
///
/// # Examples
///
/// ```
/// use u_hopfield::hopfield::{decode, StateMatrix};
/// use u_hopfield::tsp::{City, TspInstance};
///
/// let inst = TspInstance::new(vec![
///     City::new("a", 0.0, 0.0),
///     City::new("b", 1.0, 0.0),
///     City::new("c", 1.0, 1.0),
/// ]).unwrap();
/// let state = StateMatrix::from_order(&[2, 0, 1]).unwrap();
/// assert_eq!(decode(&inst, &state).unwrap().order(), &[2, 0, 1]);
/// ```
pub fn decode(instance: &TspInstance, state: &StateMatrix) -> Result<Tour> {
    state.check_dimension(instance.len())?;
    let violations = state.permutation_violations();
    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "state is not a permutation");
        return Err(HopfieldError::InvalidTour { violations });
    }
    let order = decode_partial(state)
        .into_iter()
        .flatten()
        .collect();
    Ok(Tour::new(order))
}

/// Lenient decoding: for each city row, the first active column receives
/// that city, later rows overwriting earlier ones. Unfilled positions are
/// `None`.
pub fn decode_partial(state: &StateMatrix) -> Vec<Option<usize>> {
    let n = state.n();
    let mut positions = vec![None; n];
    for x in 0..n {
        if let Some(i) = state.row(x).iter().position(|&v| v == 1) {
            positions[i] = Some(x);
        }
    }
    positions
}
