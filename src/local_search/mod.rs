//! Local search over LIFO pickup-delivery routes.
//!
//! - [`relocate`] — move one shipment to its best position anywhere
//! - [`swap`] — exchange two shipments between routes
//! - [`reversal`] — reverse the order of sibling blocks within a route
//! - [`LocalSearch`] — seeded, time-budgeted loop over all three

mod engine;
mod relocate;
mod reversal;
mod support;
mod swap;

pub use engine::{Deadline, LocalSearch, SearchOutcome};
pub use relocate::relocate;
pub use reversal::reversal;
pub use swap::swap;
