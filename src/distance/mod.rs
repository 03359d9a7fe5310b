//! Distance and travel time lookup.
//!
//! The caller injects a [`DistanceProvider`]; the builder flattens it into a
//! node-indexed [`CostMatrix`] once per solve.

mod cost_matrix;
mod provider;

pub use cost_matrix::CostMatrix;
pub use provider::{DistanceProvider, LocationTable, TravelCost};
