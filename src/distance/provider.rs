//! The injected distance/duration lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::CostMatrix;
use crate::models::Location;

/// Travel cost of one leg.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelCost {
    pub distance_km: f64,
    pub duration_min: f64,
}

impl TravelCost {
    /// Creates a travel cost.
    pub fn new(distance_km: f64, duration_min: f64) -> Self {
        Self {
            distance_km,
            duration_min,
        }
    }

    /// Returns `true` if both components are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.distance_km.is_finite()
            && self.duration_min.is_finite()
            && self.distance_km >= 0.0
            && self.duration_min >= 0.0
    }
}

/// Pure lookup of the travel cost between two locations.
///
/// Returns `None` when the pair is unknown to the provider. Implemented for
/// closures, so tests and callers with their own geometry can pass a function.
///
/// # Examples
///
/// ```
/// use pallet_routing::distance::{DistanceProvider, TravelCost};
/// use pallet_routing::models::Location;
///
/// let flat = |_: &Location, _: &Location| Some(TravelCost::new(100.0, 60.0));
/// let a = Location::new("Chicago", "IL");
/// let b = Location::new("Detroit", "MI");
/// assert_eq!(flat.cost(&a, &b).unwrap().distance_km, 100.0);
/// ```
pub trait DistanceProvider {
    /// Travel cost of driving from `from` to `to`.
    fn cost(&self, from: &Location, to: &Location) -> Option<TravelCost>;
}

impl<F> DistanceProvider for F
where
    F: Fn(&Location, &Location) -> Option<TravelCost>,
{
    fn cost(&self, from: &Location, to: &Location) -> Option<TravelCost> {
        self(from, to)
    }
}

/// A precomputed provider keyed by [`Location::key`].
///
/// # Examples
///
/// ```
/// use pallet_routing::distance::{DistanceProvider, LocationTable, TravelCost};
/// use pallet_routing::models::Location;
///
/// let mut table = LocationTable::new(["Chicago, IL", "Detroit, MI"]);
/// assert!(table.set_symmetric("Chicago, IL", "Detroit, MI", TravelCost::new(452.0, 270.0)));
///
/// let c = Location::new("Chicago", "IL");
/// let d = Location::new("Detroit", "MI");
/// assert_eq!(table.cost(&d, &c), Some(TravelCost::new(452.0, 270.0)));
/// assert!(table.cost(&c, &Location::new("Gary", "IN")).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct LocationTable {
    index: HashMap<String, usize>,
    matrix: CostMatrix,
}

impl LocationTable {
    /// Creates a table over the given location keys, all legs zero.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        for key in keys {
            let next = index.len();
            index.entry(key.into()).or_insert(next);
        }
        let matrix = CostMatrix::new(index.len());
        Self { index, matrix }
    }

    /// Position of a key in the underlying matrix.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Number of known locations.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the table knows no locations.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Sets the leg `from → to`. Returns `false` if either key is unknown.
    pub fn set(&mut self, from: &str, to: &str, cost: TravelCost) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => {
                self.matrix.set(i, j, cost);
                true
            }
            _ => false,
        }
    }

    /// Sets both directions of a leg.
    pub fn set_symmetric(&mut self, a: &str, b: &str, cost: TravelCost) -> bool {
        self.set(a, b, cost) && self.set(b, a, cost)
    }
}

impl DistanceProvider for LocationTable {
    fn cost(&self, from: &Location, to: &Location) -> Option<TravelCost> {
        let i = self.index_of(&from.key())?;
        let j = self.index_of(&to.key())?;
        Some(self.matrix.get(i, j))
    }
}
