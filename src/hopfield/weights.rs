//! Synaptic weight matrix construction.
//!
//! Neuron `(X, i)` ("city X at position i") has flat index `X * N + i`.
//! The weight between `(X, i)` and `(Y, j)` is
//!
//! ```text
//! W = -A·δXY·(1-δij) - B·δij·(1-δXY) - C - D·d(X,Y)·(δj,i+1 + δj,i-1)
//! ```
//!
//! Adjacency uses `j == i ± 1` without wrap-around, so the first and last
//! positions are not coupled through the D term.
//!
//! # References
//!
//! Hopfield & Tank (1985), "Neural computation of decisions in optimization problems"

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::types::Coefficients;
use crate::error::{HopfieldError, Result};
use crate::tsp::TspInstance;

/// Symmetric `N² × N²` coupling matrix with zero diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    n: usize,
    dim: usize,
    values: Vec<f64>,
}

impl WeightMatrix {
    /// Builds the weight matrix for `instance` and `coefficients`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hopfield::hopfield::{Coefficients, WeightMatrix};
    /// use u_hopfield::tsp::{City, TspInstance};
    ///
    /// let inst = TspInstance::new(vec![
    ///     City::new("a", 0.0, 0.0),
    ///     City::new("b", 1.0, 0.0),
    ///     City::new("c", 1.0, 1.0),
    /// ]).unwrap();
    /// let w = WeightMatrix::build(&inst, &Coefficients::new(1.0, 1.0, 1.0, 1.0));
    /// assert_eq!(w.dim(), 9);
    /// assert!(w.is_symmetric(0.0));
    /// assert!(w.has_zero_diagonal());
    /// ```
    pub fn build(instance: &TspInstance, coefficients: &Coefficients) -> Self {
        Self::build_with(instance, coefficients, false)
    }

    /// Like [`build`](Self::build), filling rows in parallel when
    /// `parallel` is set and the `parallel` feature is enabled.
    pub fn build_with(instance: &TspInstance, coefficients: &Coefficients, parallel: bool) -> Self {
        let n = instance.len();
        let dim = n * n;
        let mut values = vec![0.0; dim * dim];

        let fill_row = |a: usize, row: &mut [f64]| {
            let (x, i) = (a / n, a % n);
            for y in 0..n {
                for j in 0..n {
                    row[y * n + j] = pair_weight(instance, coefficients, x, i, y, j);
                }
            }
        };

        for_each_row(&mut values, dim, parallel, fill_row);

        let mut matrix = Self { n, dim, values };
        matrix.mirror_upper();
        matrix.zero_diagonal();
        tracing::debug!(n, dim, "built weight matrix");
        matrix
    }

    /// Number of cities the matrix was built for.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Side length `N²`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.values[a * self.dim + b]
    }

    /// Row `a` of the matrix.
    #[inline]
    pub fn row(&self, a: usize) -> &[f64] {
        &self.values[a * self.dim..(a + 1) * self.dim]
    }

    /// Weight between neurons `(x, i)` and `(y, j)`.
    pub fn between(&self, x: usize, i: usize, y: usize, j: usize) -> f64 {
        self.get(x * self.n + i, y * self.n + j)
    }

    /// `true` if `|W[a][b] - W[b][a]| <= tol` everywhere.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.dim).all(|a| ((a + 1)..self.dim).all(|b| (self.get(a, b) - self.get(b, a)).abs() <= tol))
    }

    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.dim).all(|a| self.get(a, a) == 0.0)
    }

    /// Fails unless the matrix was built for `n` cities.
    pub(crate) fn check_dimension(&self, n: usize) -> Result<()> {
        if self.n != n {
            return Err(HopfieldError::DimensionMismatch {
                what: "weight matrix",
                expected: n * n,
                actual: self.dim,
            });
        }
        Ok(())
    }

    /// Copies the upper triangle onto the lower one.
    fn mirror_upper(&mut self) {
        for a in 0..self.dim {
            for b in (a + 1)..self.dim {
                self.values[b * self.dim + a] = self.values[a * self.dim + b];
            }
        }
    }

    fn zero_diagonal(&mut self) {
        for a in 0..self.dim {
            self.values[a * self.dim + a] = 0.0;
        }
    }
}

#[cfg(feature = "parallel")]
fn for_each_row<F>(values: &mut [f64], dim: usize, parallel: bool, fill: F)
where
    F: Fn(usize, &mut [f64]) + Sync,
{
    if parallel {
        values
            .par_chunks_mut(dim)
            .enumerate()
            .for_each(|(a, row)| fill(a, row));
    } else {
        values
            .chunks_mut(dim)
            .enumerate()
            .for_each(|(a, row)| fill(a, row));
    }
}

#[cfg(not(feature = "parallel"))]
fn for_each_row<F>(values: &mut [f64], dim: usize, _parallel: bool, fill: F)
where
    F: Fn(usize, &mut [f64]),
{
    values
        .chunks_mut(dim)
        .enumerate()
        .for_each(|(a, row)| fill(a, row));
}

#[inline]
fn delta(p: bool) -> f64 {
    if p {
        1.0
    } else {
        0.0
    }
}

/// Weight formula before diagonal zeroing.
fn pair_weight(
    instance: &TspInstance,
    k: &Coefficients,
    x: usize,
    i: usize,
    y: usize,
    j: usize,
) -> f64 {
    let d_ij = delta(i == j);
    let d_xy = delta(x == y);
    let d_next = delta(j == i + 1);
    let d_prev = delta(j + 1 == i);
    -k.a * d_xy * (1.0 - d_ij) - k.b * d_ij * (1.0 - d_xy) - k.c
        - k.d * instance.distance(x, y) * (d_next + d_prev)
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn coeffs() -> Coefficients {
        Coefficients::new(2.0, 3.0, 0.5, 7.0)
    }

    #[test]
    fn test_invariants() {
        let w = WeightMatrix::build(&square(), &coeffs());
        assert_eq!(w.dim(), 16);
        assert!(w.is_symmetric(0.0));
        assert!(w.has_zero_diagonal());
    }

    #[test]
    fn test_same_city_different_position() {
        // A term only: -A - C
        let w = WeightMatrix::build(&square(), &coeffs());
        assert!((w.between(1, 0, 1, 2) - (-2.0 - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_same_position_different_city() {
        // B term only: -B - C
        let w = WeightMatrix::build(&square(), &coeffs());
        assert!((w.between(0, 3, 2, 3) - (-3.0 - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_adjacent_positions_distance_term() {
        let inst = square();
        let w = WeightMatrix::build(&inst, &coeffs());
        let expected = -0.5 - 7.0 * inst.distance(0, 2);
        assert!((w.between(0, 1, 2, 2) - expected).abs() < 1e-12);
        assert!((w.between(0, 1, 2, 0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_no_wraparound_between_first_and_last() {
        let w = WeightMatrix::build(&square(), &coeffs());
        // positions 0 and 3 are not adjacent: only the bias remains
        assert!((w.between(0, 0, 1, 3) - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_single_city() {
        let inst = TspInstance::new(vec![City::new("solo", 0.0, 0.0)]).unwrap();
        let w = WeightMatrix::build(&inst, &coeffs());
        assert_eq!(w.dim(), 1);
        assert_eq!(w.get(0, 0), 0.0);
    }

    #[test]
    fn test_parallel_flag_same_result() {
        let inst = square();
        let a = WeightMatrix::build_with(&inst, &coeffs(), false);
        let b = WeightMatrix::build_with(&inst, &coeffs(), true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_dimension_check() {
        let w = WeightMatrix::build(&square(), &coeffs());
        assert!(w.check_dimension(4).is_ok());
        assert!(matches!(
            w.check_dimension(3),
            Err(HopfieldError::DimensionMismatch { expected: 9, actual: 16, .. })
        ));
    }
}
