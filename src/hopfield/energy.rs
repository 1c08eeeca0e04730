//! Network energy evaluators.
//!
//! Two formulations are provided:
//!
//! - [`explicit_energy`]: objective term plus three constraint penalties,
//!   computed directly from the state and distances.
//! - [`general_energy`]: the quadratic form
//!   `-½·Σ W[a][b]·s[a]·s[b] - C·N·Σ s[a]` over the weight matrix.
//!
//! # Relation between the two
//!
//! Let `S` be the number of active neurons and `row`, `column`, `count` the
//! constraint terms of [`EnergyBreakdown`]. Expanding the weight matrix
//! (binary states, zero diagonal, `Σ_{a≠b} s[a]s[b] = S² - S`) gives
//!
//! ```text
//! general = row + column + count - (C/2)·(S + N²) + (D/2)·adjacency
//! ```
//!
//! where `adjacency` is [`adjacency_cost`]. For a permutation state the
//! penalties vanish, `S = N`, and `adjacency` is twice the open-path length
//! (position `N-1` back to `0` is not an adjacent pair).
//!
//! The explicit objective term is not scaled by `D`, and it indexes the
//! distance by `(city X, city i)` and the state by `(X, Y)`; it is kept
//! as-is and is not part of the relation above.

use super::types::{Coefficients, StateMatrix};
use super::weights::WeightMatrix;
use crate::error::Result;
use crate::tsp::TspInstance;

/// Components of the explicit energy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyBreakdown {
    /// Accumulated objective sum, before the outer `0.5` factor.
    pub objective: f64,
    /// `A·½·Σ s[X][i]·s[X][j]`, `i ≠ j`.
    pub row_penalty: f64,
    /// `B·½·Σ s[X][i]·s[Y][i]`, `X ≠ Y`.
    pub column_penalty: f64,
    /// `C·½·(S - N)²`.
    pub count_penalty: f64,
}

impl EnergyBreakdown {
    /// Sum of the three constraint penalties.
    pub fn constraint(&self) -> f64 {
        self.row_penalty + self.column_penalty + self.count_penalty
    }

    /// `0.5·objective + constraint`.
    pub fn total(&self) -> f64 {
        0.5 * self.objective + self.constraint()
    }
}

/// Explicit constraint-based energy of `state`.
///
/// # Examples
///
/// ```
/// use u_hopfield::hopfield::{explicit_energy, Coefficients, StateMatrix};
/// use u_hopfield::tsp::{City, TspInstance};
///
/// let inst = TspInstance::new(vec![
///     City::new("a", 0.0, 0.0),
///     City::new("b", 1.0, 0.0),
/// ]).unwrap();
/// let empty = StateMatrix::zeros(2);
/// let e = explicit_energy(&inst, &empty, &Coefficients::new(1.0, 1.0, 1.0, 1.0)).unwrap();
/// // only the count penalty: 0.5 * (0 - 2)^2
/// assert!((e - 2.0).abs() < 1e-12);
/// ```
pub fn explicit_energy(
    instance: &TspInstance,
    state: &StateMatrix,
    coefficients: &Coefficients,
) -> Result<f64> {
    Ok(explicit_breakdown(instance, state, coefficients)?.total())
}

/// Explicit energy split into its terms.
pub fn explicit_breakdown(
    instance: &TspInstance,
    state: &StateMatrix,
    coefficients: &Coefficients,
) -> Result<EnergyBreakdown> {
    state.check_dimension(instance.len())?;
    Ok(breakdown_unchecked(instance, state, coefficients))
}

pub(crate) fn breakdown_unchecked(
    instance: &TspInstance,
    state: &StateMatrix,
    k: &Coefficients,
) -> EnergyBreakdown {
    let n = instance.len();
    let s = |x: usize, i: usize| f64::from(state.get(x, i));

    let mut objective = 0.0;
    for x in 0..n {
        for i in 0..n {
            let d = instance.distance(x, i);
            for y in (0..n).filter(|&y| y != x) {
                let neighbours = s(y, (i + 1) % n) + s(y, (i + n - 1) % n);
                objective += 0.5 * d * s(x, y) * neighbours;
            }
        }
    }

    let mut row_pairs = 0.0;
    for x in 0..n {
        for i in 0..n {
            for j in (0..n).filter(|&j| j != i) {
                row_pairs += s(x, i) * s(x, j);
            }
        }
    }

    let mut column_pairs = 0.0;
    for i in 0..n {
        for x in 0..n {
            for y in (0..n).filter(|&y| y != x) {
                column_pairs += s(x, i) * s(y, i);
            }
        }
    }

    let surplus = state.active_count() as f64 - n as f64;

    EnergyBreakdown {
        objective,
        row_penalty: k.a * 0.5 * row_pairs,
        column_penalty: k.b * 0.5 * column_pairs,
        count_penalty: k.c * 0.5 * surplus * surplus,
    }
}

/// Quadratic-form energy of `state` under `weights`.
///
/// `state` is flattened in the `X * N + i` order the weights were built with.
pub fn general_energy(
    state: &StateMatrix,
    weights: &WeightMatrix,
    coefficients: &Coefficients,
) -> Result<f64> {
    weights.check_dimension(state.n())?;
    Ok(general_unchecked(state, weights, coefficients))
}

pub(crate) fn general_unchecked(
    state: &StateMatrix,
    weights: &WeightMatrix,
    k: &Coefficients,
) -> f64 {
    let s = state.as_slice();
    let n = state.n() as f64;

    // binary state: only active rows and columns contribute
    let active: Vec<usize> = (0..s.len()).filter(|&a| s[a] == 1).collect();
    let mut second_order = 0.0;
    for &a in &active {
        let row = weights.row(a);
        for &b in &active {
            second_order += row[b];
        }
    }
    let first_order = active.len() as f64;

    -0.5 * second_order - k.c * n * first_order
}

/// Distance coupling of neurons in adjacent positions (no wrap-around):
/// `Σ_{X,Y} d(X,Y)·Σ_i s[X][i]·(s[Y][i+1] + s[Y][i-1])`.
pub fn adjacency_cost(instance: &TspInstance, state: &StateMatrix) -> Result<f64> {
    let n = instance.len();
    state.check_dimension(n)?;
    let mut cost = 0.0;
    for x in 0..n {
        for i in (0..n).filter(|&i| state.get(x, i) == 1) {
            for y in 0..n {
                let mut neighbours = 0u8;
                if i + 1 < n {
                    neighbours += state.get(y, i + 1);
                }
                if i > 0 {
                    neighbours += state.get(y, i - 1);
                }
                cost += instance.distance(x, y) * f64::from(neighbours);
            }
        }
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HopfieldError;
    use crate::tsp::City;

    fn square() -> TspInstance {
        TspInstance::new(vec![
            City::new("a", 0.0, 0.0),
            City::new("b", 1.0, 0.0),
            City::new("c", 1.0, 1.0),
            City::new("d", 0.0, 1.0),
        ])
        .unwrap()
    }

    fn relation_holds(inst: &TspInstance, state: &StateMatrix, k: &Coefficients) {
        let w = WeightMatrix::build(inst, k);
        let general = general_energy(state, &w, k).unwrap();
        let parts = explicit_breakdown(inst, state, k).unwrap();
        let s = state.active_count() as f64;
        let n = inst.len() as f64;
        let predicted = parts.constraint() - 0.5 * k.c * (s + n * n)
            + 0.5 * k.d * adjacency_cost(inst, state).unwrap();
        assert!(
            (general - predicted).abs() < 1e-9,
            "general {general} vs predicted {predicted}"
        );
    }

    #[test]
    fn test_identity_permutation_general_energy() {
        let inst = square();
        let k = Coefficients::new(1.0, 1.0, 1.0, 1.0);
        let w = WeightMatrix::build(&inst, &k);
        let state = StateMatrix::from_order(&[0, 1, 2, 3]).unwrap();
        // -(C/2)(N + N²) + D·open_path = -10 + 3
        let e = general_energy(&state, &w, &k).unwrap();
        assert!((e - (-7.0)).abs() < 1e-12, "got {e}");
    }

    #[test]
    fn test_permutation_has_no_constraint_penalty() {
        let inst = square();
        let k = Coefficients::new(3.0, 5.0, 7.0, 11.0);
        let state = StateMatrix::from_order(&[2, 0, 3, 1]).unwrap();
        let parts = explicit_breakdown(&inst, &state, &k).unwrap();
        assert_eq!(parts.constraint(), 0.0);
    }

    #[test]
    fn test_relation_on_permutation() {
        let k = Coefficients::new(2.0, 3.0, 0.5, 1.5);
        relation_holds(&square(), &StateMatrix::from_order(&[1, 3, 0, 2]).unwrap(), &k);
    }

    #[test]
    fn test_relation_on_non_permutation() {
        let k = Coefficients::new(2.0, 3.0, 0.5, 1.5);
        let state = StateMatrix::from_rows(vec![
            vec![1, 1, 0, 0],
            vec![0, 0, 0, 0],
            vec![1, 0, 1, 0],
            vec![0, 0, 1, 1],
        ])
        .unwrap();
        relation_holds(&square(), &state, &k);
    }

    #[test]
    fn test_relation_on_empty_and_full() {
        let k = Coefficients::new(1.0, 2.0, 3.0, 4.0);
        relation_holds(&square(), &StateMatrix::zeros(4), &k);
        let full = StateMatrix::from_rows(vec![vec![1; 4]; 4]).unwrap();
        relation_holds(&square(), &full, &k);
    }

    #[test]
    fn test_explicit_penalties_on_known_state() {
        let inst = square();
        let k = Coefficients::new(1.0, 1.0, 1.0, 1.0);
        // city 0 in positions 0 and 1; city 1 in position 0
        let state = StateMatrix::from_rows(vec![
            vec![1, 1, 0, 0],
            vec![1, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let parts = explicit_breakdown(&inst, &state, &k).unwrap();
        assert!((parts.row_penalty - 1.0).abs() < 1e-12);
        assert!((parts.column_penalty - 1.0).abs() < 1e-12);
        assert!((parts.count_penalty - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_objective_nesting() {
        // s[0][1] = 1 and s[1][*] has a 1 at position 1; for X=0, Y=1 the
        // neighbours of i=0 and i=2 both include position 1.
        let inst = square();
        let k = Coefficients::new(0.0, 0.0, 0.0, 0.0);
        let state = StateMatrix::from_rows(vec![
            vec![0, 1, 0, 0],
            vec![0, 1, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let parts = explicit_breakdown(&inst, &state, &k).unwrap();
        // 0.5 * (d(0,0) + d(0,2)) = 0.5 * sqrt(2)
        let expected = 0.5 * 2f64.sqrt();
        assert!((parts.objective - expected).abs() < 1e-12);
        assert!((parts.total() - 0.5 * expected).abs() < 1e-12);
    }

    #[test]
    fn test_open_path_adjacency() {
        let inst = square();
        let state = StateMatrix::from_order(&[0, 1, 2, 3]).unwrap();
        assert!((adjacency_cost(&inst, &state).unwrap() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let inst = square();
        let k = Coefficients::default();
        let w = WeightMatrix::build(&inst, &k);
        let small = StateMatrix::zeros(3);
        assert!(matches!(
            general_energy(&small, &w, &k),
            Err(HopfieldError::DimensionMismatch { .. })
        ));
        assert!(explicit_energy(&inst, &small, &k).is_err());
    }
}
