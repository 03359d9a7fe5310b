//! Domain model types for pallet pickup-delivery routing.
//!
//! Shipments and locations come from the caller; the fleet configuration
//! bounds the search; the problem model turns shipments into pickup/delivery
//! node pairs; routes and solutions hold the search state.

mod fleet;
mod problem;
mod route;
mod shipment;
mod solution;
mod vehicle;

pub use fleet::FleetConfig;
pub use problem::{Node, NodeKind, ProblemModel};
pub use route::{Route, RouteMetrics, Stop};
pub use shipment::{Location, Shipment, MAX_PALLETS_PER_SHIPMENT};
pub use solution::{Solution, Unassigned, UnassignedReason};
pub(crate) use solution::route_cost;
pub use vehicle::Vehicle;
