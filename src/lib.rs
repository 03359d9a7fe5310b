//! # pallet-routing
//!
//! Pickup-delivery vehicle routing for pallet freight under a LIFO loading
//! discipline: whatever was loaded last comes off first.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Shipment, Location, FleetConfig, Route, Solution)
//! - [`distance`] — Distance/duration provider and node cost matrix
//! - [`builder`] — Input validation and problem construction
//! - [`evaluation`] — Route feasibility (capacity, LIFO nesting, limits)
//! - [`constructive`] — Cheapest feasible pair insertion
//! - [`local_search`] — Relocate, swap and block reversal under a time budget
//! - [`extraction`] — Serializable solution records
//! - [`solver`] — End-to-end orchestration with optional multi-start
//! - [`error`] — Validation and solve errors
//!
//! ## Example
//!
//! ```
//! use pallet_routing::distance::{LocationTable, TravelCost};
//! use pallet_routing::models::{FleetConfig, Location, Shipment};
//!
//! let mut table = LocationTable::new(["Chicago, IL", "Detroit, MI"]);
//! table.set_symmetric("Chicago, IL", "Detroit, MI", TravelCost::new(454.0, 270.0));
//!
//! let shipments = vec![Shipment::new(
//!     "SHP001",
//!     Location::new("Chicago", "IL"),
//!     Location::new("Detroit", "MI"),
//!     10,
//! )];
//! let fleet = FleetConfig::new(10, 800.0).with_time_limit(5.0);
//!
//! let solution = pallet_routing::solve(&shipments, &fleet, &table).unwrap();
//! assert_eq!(solution.routes.len(), 1);
//! assert_eq!(solution.total_distance, 454.0);
//! ```

pub mod builder;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod extraction;
pub mod local_search;
pub mod models;
pub mod solver;

#[cfg(test)]
mod test_support;

pub use error::{SolveError, ValidationError};
pub use extraction::{RouteView, SolutionView, StopView, UnassignedView};
pub use solver::{solve, validate, Solver, SolverConfig};
