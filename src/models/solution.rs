//! Solution and unassigned-shipment types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Route, Vehicle};

/// Why a shipment could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnassignedReason {
    /// The shipment alone exceeds vehicle capacity.
    CapacityExceeded,
    /// No route could take it under the current fleet and limits.
    NoFeasibleRoute,
}

impl UnassignedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::NoFeasibleRoute => "NO_FEASIBLE_ROUTE",
        }
    }
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shipment the search could not place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unassigned {
    /// Shipment index in the problem model.
    pub shipment: usize,
    pub reason: UnassignedReason,
}

/// Routes plus the shipments left out, with running totals.
///
/// Totals are maintained incrementally as routes are pushed or replaced; a
/// route with no stops contributes nothing (not even its fixed cost).
///
/// # Examples
///
/// ```
/// use pallet_routing::models::{Route, RouteMetrics, Solution, Vehicle};
///
/// let vehicle = Vehicle::new(0, 26, 800.0).with_fixed_cost(5.0);
/// let mut sol = Solution::new();
/// let metrics = RouteMetrics { distance: 40.0, duration: 60.0, peak_load: 10 };
/// sol.push_route(Route::with_sequence(0, vec![0, 1], metrics), &vehicle);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.total_distance(), 40.0);
/// assert_eq!(sol.total_cost(), 45.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<Unassigned>,
    total_distance: f64,
    total_cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unassigned: Vec::new(),
            total_distance: 0.0,
            total_cost: 0.0,
        }
    }

    /// Adds a route, updating totals.
    pub fn push_route(&mut self, route: Route, vehicle: &Vehicle) {
        self.total_distance += route.total_distance();
        self.total_cost += route_cost(&route, vehicle);
        self.routes.push(route);
    }

    /// Replaces route `index`, updating totals by the difference.
    pub fn replace_route(&mut self, index: usize, route: Route, vehicle: &Vehicle) {
        let old = &self.routes[index];
        self.total_distance += route.total_distance() - old.total_distance();
        self.total_cost += route_cost(&route, vehicle) - route_cost(old, vehicle);
        self.routes[index] = route;
    }

    /// Drops routes without stops, freeing their vehicles.
    pub fn remove_empty_routes(&mut self) {
        self.routes.retain(|r| !r.is_empty());
    }

    /// Marks a shipment as unassigned.
    pub fn add_unassigned(&mut self, unassigned: Unassigned) {
        self.unassigned.push(unassigned);
    }

    /// Removes and returns the unassigned list.
    pub fn take_unassigned(&mut self) -> Vec<Unassigned> {
        std::mem::take(&mut self.unassigned)
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Shipments the search left out.
    pub fn unassigned(&self) -> &[Unassigned] {
        &self.unassigned
    }

    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total cost across all routes.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Total number of shipments served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len() / 2).sum()
    }

    /// Lowest vehicle index not driving a route.
    pub fn next_vehicle_id(&self) -> usize {
        (0..)
            .find(|id| self.routes.iter().all(|r| r.vehicle_id() != *id))
            .unwrap_or(self.routes.len())
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

/// Cost a route contributes to the objective.
pub(crate) fn route_cost(route: &Route, vehicle: &Vehicle) -> f64 {
    if route.is_empty() {
        0.0
    } else {
        vehicle.route_cost(route.total_distance())
    }
}
