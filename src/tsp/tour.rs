//! Decoded tours and closed-path length.

use super::city::City;
use super::instance::TspInstance;
use crate::error::{HopfieldError, Result};
use crate::hopfield::StateMatrix;

/// A visiting order over the cities of a [`TspInstance`].
///
/// `order[k]` is the index of the city visited at position `k`. A tour
/// borrows its cities from the instance rather than owning them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Wraps an order already known to be a permutation of `0..N`.
    pub(crate) fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// Builds a tour over `instance`, requiring `order` to visit every city
    /// exactly once.
    pub fn from_order(instance: &TspInstance, order: Vec<usize>) -> Result<Self> {
        if order.len() != instance.len() {
            return Err(HopfieldError::DimensionMismatch {
                what: "tour length",
                expected: instance.len(),
                actual: order.len(),
            });
        }
        let violations = StateMatrix::from_order(&order)?.permutation_violations();
        if !violations.is_empty() {
            return Err(HopfieldError::InvalidTour { violations });
        }
        Ok(Self::new(order))
    }

    /// City indices in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolves the visiting order to cities of `instance`.
    pub fn cities<'a>(&self, instance: &'a TspInstance) -> Vec<&'a City> {
        self.order.iter().map(|&x| instance.city(x)).collect()
    }

    /// Length of the closed cycle, returning to the first city.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hopfield::tsp::{City, TspInstance, Tour};
    ///
    /// let inst = TspInstance::new(vec![
    ///     City::new("a", 0.0, 0.0),
    ///     City::new("b", 1.0, 0.0),
    ///     City::new("c", 1.0, 1.0),
    ///     City::new("d", 0.0, 1.0),
    /// ]).unwrap();
    /// let tour = Tour::from_order(&inst, vec![0, 1, 2, 3]).unwrap();
    /// assert!((tour.length(&inst) - 4.0).abs() < 1e-12);
    /// ```
    pub fn length(&self, instance: &TspInstance) -> f64 {
        let n = self.order.len();
        (0..n)
            .map(|k| instance.distance(self.order[k], self.order[(k + 1) % n]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> TspInstance {
        TspInstance::new(vec![
            City::new("a", 0.0, 0.0),
            City::new("b", 1.0, 0.0),
            City::new("c", 1.0, 1.0),
            City::new("d", 0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_square_perimeter() {
        let tour = Tour::new(vec![0, 1, 2, 3]);
        assert!((tour.length(&square()) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_crossing_tour_is_longer() {
        let inst = square();
        let crossing = Tour::new(vec![0, 2, 1, 3]);
        let expected = 2.0 + 2.0 * 2f64.sqrt();
        assert!((crossing.length(&inst) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_invariant() {
        let inst = square();
        let a = Tour::new(vec![0, 1, 2, 3]).length(&inst);
        let b = Tour::new(vec![2, 3, 0, 1]).length(&inst);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_cities_resolve_names() {
        let inst = square();
        let names: Vec<&str> = Tour::new(vec![3, 0])
            .cities(&inst)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["d", "a"]);
    }

    #[test]
    fn test_single_city_zero_length() {
        let inst = TspInstance::new(vec![City::new("solo", 1.0, 1.0)]).unwrap();
        assert_eq!(Tour::new(vec![0]).length(&inst), 0.0);
    }

    #[test]
    fn test_from_order_rejects_out_of_range_city() {
        let inst = square();
        assert!(matches!(
            Tour::from_order(&inst, vec![0, 7, 1, 2]),
            Err(HopfieldError::DimensionMismatch { actual: 7, .. })
        ));
    }

    #[test]
    fn test_from_order_rejects_wrong_length() {
        assert!(matches!(
            Tour::from_order(&square(), vec![0, 1]),
            Err(HopfieldError::DimensionMismatch { expected: 4, actual: 2, .. })
        ));
    }

    #[test]
    fn test_from_order_rejects_repeated_city() {
        assert!(matches!(
            Tour::from_order(&square(), vec![0, 1, 1, 3]),
            Err(HopfieldError::InvalidTour { .. })
        ));
    }

    #[test]
    fn test_from_order_accepts_permutation() {
        let inst = square();
        let tour = Tour::from_order(&inst, vec![3, 2, 1, 0]).unwrap();
        assert!((tour.length(&inst) - 4.0).abs() < 1e-12);
    }
}
