//! TSP problem instance.

use super::city::{distance, City};
use crate::error::{HopfieldError, Result};

/// An ordered list of cities with a cached distance matrix.
///
/// The city order defines the row index `X` used by the Hopfield state and
/// weight matrices. `N` is fixed for the lifetime of the instance.
#[derive(Debug, Clone)]
pub struct TspInstance {
    cities: Vec<City>,
    /// Row-major `n × n` pairwise distances.
    distances: Vec<f64>,
}

impl TspInstance {
    /// Builds an instance, rejecting an empty city list.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hopfield::tsp::{City, TspInstance};
    ///
    /// let inst = TspInstance::new(vec![
    ///     City::new("a", 0.0, 0.0),
    ///     City::new("b", 3.0, 4.0),
    /// ]).unwrap();
    /// assert_eq!(inst.len(), 2);
    /// assert!((inst.distance(0, 1) - 5.0).abs() < 1e-12);
    /// ```
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(HopfieldError::EmptyInstance);
        }
        let n = cities.len();
        let mut distances = vec![0.0; n * n];
        for x in 0..n {
            for y in (x + 1)..n {
                let d = distance(&cities[x], &cities[y]);
                distances[x * n + y] = d;
                distances[y * n + x] = d;
            }
        }
        Ok(Self { cities, distances })
    }

    /// Number of cities `N`.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`; construction rejects empty instances.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, index: usize) -> &City {
        &self.cities[index]
    }

    /// Cached distance between cities `x` and `y`.
    #[inline]
    pub fn distance(&self, x: usize, y: usize) -> f64 {
        self.distances[x * self.cities.len() + y]
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
    fn test_empty_instance_rejected() {
        assert_eq!(
            TspInstance::new(Vec::new()).unwrap_err(),
            HopfieldError::EmptyInstance
        );
    }

    #[test]
    fn test_distance_cache_matches_direct() {
        let inst = square();
        for x in 0..4 {
            for y in 0..4 {
                let direct = distance(inst.city(x), inst.city(y));
                assert!((inst.distance(x, y) - direct).abs() < 1e-12);
            }
        }
        assert!((inst.distance(0, 2) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_city() {
        let inst = TspInstance::new(vec![City::new("solo", 5.0, 5.0)]).unwrap();
        assert_eq!(inst.len(), 1);
        assert_eq!(inst.distance(0, 0), 0.0);
    }
}
