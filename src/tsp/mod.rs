//! Traveling Salesman Problem model.
//!
//! Cities, the problem instance that owns them, and decoded tours.
//! These types carry no Hopfield-specific logic; the network in
//! [`crate::hopfield`] reads distances from a [`TspInstance`] and
//! produces a [`Tour`].

mod city;
mod instance;
mod tour;

pub use city::{distance, City};
pub use instance::TspInstance;
pub use tour::Tour;
