//! Pickup/delivery pair insertion shared by construction and local search.
//!
//! A pair can only be inserted so that everything between its pickup and its
//! delivery is a run of complete sibling blocks: the new shipment sits on top
//! of the stack while that run is handled. Positions that fail this are never
//! built; the rest are priced in O(1) and only those that can beat the
//! incumbent go through the [`FeasibilityChecker`].

use crate::distance::CostMatrix;
use crate::evaluation::FeasibilityChecker;
use crate::models::{route_cost, NodeKind, ProblemModel, Route, RouteMetrics, Solution};

/// Improvement threshold for all cost comparisons.
pub(crate) const EPSILON: f64 = 1e-9;

/// Positions for a shipment's two nodes within an existing sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairInsertion {
    /// Pickup goes before `sequence[pickup_pos]`.
    pub pickup_pos: usize,
    /// Delivery goes before `sequence[delivery_pos]`; `delivery_pos >= pickup_pos`.
    pub delivery_pos: usize,
    /// Distance the insertion adds.
    pub delta: f64,
    /// Metrics of the resulting sequence.
    pub metrics: RouteMetrics,
}

impl PairInsertion {
    /// Builds the sequence with the pair inserted.
    pub fn apply(&self, sequence: &[usize], pickup: usize, delivery: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(sequence.len() + 2);
        fill_candidate(
            &mut out,
            sequence,
            self.pickup_pos,
            self.delivery_pos,
            pickup,
            delivery,
        );
        out
    }
}

/// Distance added by inserting `pickup` before position `i` and `delivery`
/// before position `j` (`i <= j`) of `sequence`.
///
/// # Examples
///
/// ```
/// use pallet_routing::constructive::pair_insertion_delta;
/// use pallet_routing::distance::{CostMatrix, TravelCost};
///
/// // nodes 0..4 on a line at 0, 10, 2, 8
/// let pos = [0.0f64, 10.0, 2.0, 8.0];
/// let mut m = CostMatrix::new(4);
/// for i in 0..4 {
///     for j in 0..4 {
///         let d = (pos[i] - pos[j]).abs();
///         m.set(i, j, TravelCost::new(d, d));
///     }
/// }
/// // [0, 1] → [0, 2, 3, 1]: 0→2→8→10 is as long as 0→10
/// assert_eq!(pair_insertion_delta(&[0, 1], 1, 1, 2, 3, &m), 0.0);
/// // [0, 1] → [2, 3, 0, 1]: adds 2→8→0
/// assert_eq!(pair_insertion_delta(&[0, 1], 0, 0, 2, 3, &m), 14.0);
/// ```
pub fn pair_insertion_delta(
    sequence: &[usize],
    i: usize,
    j: usize,
    pickup: usize,
    delivery: usize,
    costs: &CostMatrix,
) -> f64 {
    let prev = i.checked_sub(1).map(|k| sequence[k]);
    if i == j {
        let next = sequence.get(i).copied();
        let mut delta = costs.distance(pickup, delivery);
        if let Some(a) = prev {
            delta += costs.distance(a, pickup);
        }
        if let Some(b) = next {
            delta += costs.distance(delivery, b);
        }
        if let (Some(a), Some(b)) = (prev, next) {
            delta -= costs.distance(a, b);
        }
        return delta;
    }

    // i < j <= len, so sequence[i] and sequence[j - 1] exist
    let after_pickup = sequence[i];
    let mut delta = costs.distance(pickup, after_pickup);
    if let Some(a) = prev {
        delta += costs.distance(a, pickup) - costs.distance(a, after_pickup);
    }
    let before_delivery = sequence[j - 1];
    delta += costs.distance(before_delivery, delivery);
    if let Some(&e) = sequence.get(j) {
        delta += costs.distance(delivery, e) - costs.distance(before_delivery, e);
    }
    delta
}

/// Cheapest feasible insertion of `shipment` into `sequence`.
///
/// Ties on distance go to the lower resulting peak load, then to the first
/// position found.
pub fn best_pair_insertion(
    checker: &FeasibilityChecker<'_>,
    sequence: &[usize],
    shipment: usize,
) -> Option<PairInsertion> {
    let problem = checker.problem();
    let costs = problem.costs();
    let pickup = problem.pickup_of(shipment);
    let delivery = problem.delivery_of(shipment);

    let mut best: Option<PairInsertion> = None;
    let mut candidate = Vec::with_capacity(sequence.len() + 2);

    for i in 0..=sequence.len() {
        let mut depth: usize = 0;
        for j in i..=sequence.len() {
            if j > i {
                match problem.node(sequence[j - 1]).kind {
                    NodeKind::Pickup => depth += 1,
                    NodeKind::Delivery => {
                        if depth == 0 {
                            // a shipment loaded before i leaves here
                            break;
                        }
                        depth -= 1;
                    }
                }
            }
            if depth != 0 {
                continue;
            }

            let delta = pair_insertion_delta(sequence, i, j, pickup, delivery, costs);
            if best.as_ref().is_some_and(|b| delta > b.delta + EPSILON) {
                continue;
            }

            fill_candidate(&mut candidate, sequence, i, j, pickup, delivery);
            let Ok(metrics) = checker.check(&candidate) else {
                continue;
            };

            let is_better = best.as_ref().is_none_or(|b| {
                delta < b.delta - EPSILON || metrics.peak_load < b.metrics.peak_load
            });
            if is_better {
                best = Some(PairInsertion {
                    pickup_pos: i,
                    delivery_pos: j,
                    delta,
                    metrics,
                });
            }
        }
    }

    best
}

fn fill_candidate(
    out: &mut Vec<usize>,
    sequence: &[usize],
    i: usize,
    j: usize,
    pickup: usize,
    delivery: usize,
) {
    out.clear();
    out.extend_from_slice(&sequence[..i]);
    out.push(pickup);
    out.extend_from_slice(&sequence[i..j]);
    out.push(delivery);
    out.extend_from_slice(&sequence[j..]);
}

/// Which route a placement goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Route(usize),
    NewRoute,
}

/// Cheapest feasible home for a shipment across a whole solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub target: Target,
    pub insertion: PairInsertion,
    /// Change in total cost (distance cost plus fixed cost of a new route).
    pub cost_delta: f64,
}

/// Finds the cheapest feasible placement of `shipment` in any open route or,
/// if the fleet allows, in a new one.
pub fn cheapest_placement(
    problem: &ProblemModel,
    solution: &Solution,
    shipment: usize,
) -> Option<Placement> {
    let mut best: Option<Placement> = None;

    let mut consider = |target: Target, insertion: PairInsertion, cost_delta: f64| {
        let is_better = best.as_ref().is_none_or(|b| {
            cost_delta < b.cost_delta - EPSILON
                || (cost_delta <= b.cost_delta + EPSILON
                    && insertion.metrics.peak_load < b.insertion.metrics.peak_load)
        });
        if is_better {
            best = Some(Placement {
                target,
                insertion,
                cost_delta,
            });
        }
    };

    for (r, route) in solution.routes().iter().enumerate() {
        let vehicle = problem.vehicle(route.vehicle_id());
        let checker = FeasibilityChecker::new(problem, &vehicle);
        if let Some(ins) = best_pair_insertion(&checker, route.nodes(), shipment) {
            let cost_delta = vehicle.route_cost(ins.metrics.distance) - route_cost(route, &vehicle);
            consider(Target::Route(r), ins, cost_delta);
        }
    }

    if solution.num_routes() < problem.max_vehicles() {
        let vehicle = problem.vehicle(solution.next_vehicle_id());
        let checker = FeasibilityChecker::new(problem, &vehicle);
        if let Some(ins) = best_pair_insertion(&checker, &[], shipment) {
            consider(Target::NewRoute, ins, vehicle.route_cost(ins.metrics.distance));
        }
    }

    best
}

/// Applies a placement found by [`cheapest_placement`] on the same solution.
pub fn apply_placement(
    problem: &ProblemModel,
    solution: &mut Solution,
    shipment: usize,
    placement: &Placement,
) {
    let pickup = problem.pickup_of(shipment);
    let delivery = problem.delivery_of(shipment);
    match placement.target {
        Target::Route(r) => {
            let route = solution.route(r);
            let vehicle = problem.vehicle(route.vehicle_id());
            let nodes = placement.insertion.apply(route.nodes(), pickup, delivery);
            let updated = Route::with_sequence(route.vehicle_id(), nodes, placement.insertion.metrics);
            solution.replace_route(r, updated, &vehicle);
        }
        Target::NewRoute => {
            let vehicle = problem.vehicle(solution.next_vehicle_id());
            let nodes = placement.insertion.apply(&[], pickup, delivery);
            let route = Route::with_sequence(vehicle.id(), nodes, placement.insertion.metrics);
            solution.push_route(route, &vehicle);
        }
    }
}
