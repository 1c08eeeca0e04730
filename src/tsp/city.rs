//! Cities and Euclidean distance.

/// A named point in the plane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl City {
    /// Creates a city.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hopfield::tsp::City;
    ///
    /// let c = City::new("Seoul", 1.0, 2.0);
    /// assert_eq!(c.name, "Seoul");
    /// ```
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        distance(self, other)
    }
}

/// Euclidean distance `sqrt(dx² + dy²)` between two cities.
pub fn distance(a: &City, b: &City) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
