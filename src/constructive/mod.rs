//! Construction of initial pickup-delivery solutions.
//!
//! - [`cheapest_insertion`] — ordered cheapest feasible pair insertion
//! - [`best_pair_insertion`] — best LIFO-feasible position pair in one route
//! - [`cheapest_placement`] — best route (or new route) for one shipment

mod cheapest_insertion;
mod insertion;

pub use cheapest_insertion::{canonical_order, cheapest_insertion};
pub(crate) use insertion::EPSILON;
pub use insertion::{
    apply_placement, best_pair_insertion, cheapest_placement, pair_insertion_delta,
    PairInsertion, Placement, Target,
};
