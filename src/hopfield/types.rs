//! Network coefficients and neuron state.

use rand::Rng;

use crate::error::{HopfieldError, Result};

/// Penalty and cost coefficients of the TSP energy function.
///
/// | Coefficient | Penalises |
/// |---|---|
/// | `a` | a city occupying more than one tour position (row) |
/// | `b` | a tour position holding more than one city (column) |
/// | `c` | total active count differing from `N` |
/// | `d` | distance between cities in adjacent positions |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for Coefficients {
    /// Hopfield & Tank (1985) values.
    fn default() -> Self {
        Self {
            a: 500.0,
            b: 500.0,
            c: 200.0,
            d: 500.0,
        }
    }
}

impl Coefficients {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Checks that every coefficient is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("A", self.a), ("B", self.b), ("C", self.c), ("D", self.d)] {
            if !value.is_finite() || value < 0.0 {
                return Err(HopfieldError::InvalidConfig(format!(
                    "coefficient {name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// A defect that keeps a state matrix from encoding a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermutationViolation {
    /// City `row` is assigned to no position.
    EmptyRow { row: usize },
    /// City `row` is assigned to `count` positions.
    MultipleInRow { row: usize, count: usize },
    /// Position `col` holds no city.
    EmptyColumn { col: usize },
    /// Position `col` holds `count` cities.
    MultipleInColumn { col: usize, count: usize },
}

/// Binary `N × N` neuron state.
///
/// Entry `(x, i)` is 1 when city `x` is visited at tour position `i`.
/// Storage is row-major, so [`as_slice`](Self::as_slice) is already the
/// `x * n + i` flattening used by the weight matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateMatrix {
    n: usize,
    cells: Vec<u8>,
}

impl StateMatrix {
    /// All neurons inactive.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    /// Builds a state from nested rows, checking shape and binarity.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hopfield::hopfield::StateMatrix;
    ///
    /// let s = StateMatrix::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
    /// assert!(s.is_permutation());
    /// assert!(StateMatrix::from_rows(vec![vec![0, 2], vec![1, 0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for (x, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(HopfieldError::DimensionMismatch {
                    what: "state matrix row",
                    expected: n,
                    actual: row.len(),
                });
            }
            for (i, &value) in row.iter().enumerate() {
                if value > 1 {
                    return Err(HopfieldError::NonBinaryState {
                        row: x,
                        col: i,
                        value,
                    });
                }
            }
            cells.extend(row);
        }
        Ok(Self { n, cells })
    }

    /// Encodes a visiting order as a permutation matrix.
    ///
    /// City `order[k]` is activated at position `k`. Fails if an index is
    /// out of range; repeated indices produce a non-permutation state.
    pub fn from_order(order: &[usize]) -> Result<Self> {
        let n = order.len();
        let mut state = Self::zeros(n);
        for (position, &city) in order.iter().enumerate() {
            if city >= n {
                return Err(HopfieldError::DimensionMismatch {
                    what: "tour city index",
                    expected: n,
                    actual: city,
                });
            }
            state.set(city, position, true);
        }
        Ok(state)
    }

    /// Random state where each neuron fires with probability `p`.
    pub fn random<R: Rng>(n: usize, p: f64, rng: &mut R) -> Self {
        let p = p.clamp(0.0, 1.0);
        let cells = (0..n * n).map(|_| u8::from(rng.random_bool(p))).collect();
        Self { n, cells }
    }

    /// Side length `N`.
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, x: usize, i: usize) -> u8 {
        self.cells[x * self.n + i]
    }

    /// Activates or clears neuron `(x, i)`.
    #[inline]
    pub fn set(&mut self, x: usize, i: usize, active: bool) {
        self.cells[x * self.n + i] = u8::from(active);
    }

    /// Row of city `x`.
    pub fn row(&self, x: usize) -> &[u8] {
        &self.cells[x * self.n..(x + 1) * self.n]
    }

    /// Flattened `x * n + i` view.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Number of active neurons.
    pub fn active_count(&self) -> usize {
        self.cells.iter().map(|&v| v as usize).sum()
    }

    pub fn is_permutation(&self) -> bool {
        self.permutation_violations().is_empty()
    }

    /// Lists every row and column that does not hold exactly one 1.
    pub fn permutation_violations(&self) -> Vec<PermutationViolation> {
        let n = self.n;
        let mut violations = Vec::new();
        for x in 0..n {
            match self.row(x).iter().filter(|&&v| v == 1).count() {
                0 => violations.push(PermutationViolation::EmptyRow { row: x }),
                1 => {}
                count => violations.push(PermutationViolation::MultipleInRow { row: x, count }),
            }
        }
        for i in 0..n {
            match (0..n).filter(|&x| self.get(x, i) == 1).count() {
                0 => violations.push(PermutationViolation::EmptyColumn { col: i }),
                1 => {}
                count => violations.push(PermutationViolation::MultipleInColumn { col: i, count }),
            }
        }
        violations
    }

    /// Fails unless this state is `expected × expected`.
    pub(crate) fn check_dimension(&self, expected: usize) -> Result<()> {
        if self.n != expected {
            return Err(HopfieldError::DimensionMismatch {
                what: "state matrix",
                expected,
                actual: self.n,
            });
        }
        Ok(())
    }
}
