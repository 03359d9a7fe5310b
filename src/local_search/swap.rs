//! Inter-route shipment swap.
//!
//! # Algorithm
//!
//! For two shipments served by different routes, take each out of its route
//! and insert it at the cheapest feasible position pair of the other route.
//! Accepts the first pair (in scan order) whose exchange lowers total cost.
//! This reaches improvements relocation cannot, when neither route has the
//! capacity or distance slack to take a shipment without giving one back.
//!
//! # Complexity
//!
//! O(n² · L³) worst case per call for n shipments on routes of L stops.
//!
//! # Reference
//!
//! Osman, I.H. (1993). "Metastrategy simulated annealing and tabu search
//! algorithms for the vehicle routing problem", *Annals of Operations
//! Research* 41, 421-451.

use super::support::{route_index, without_pair};
use super::Deadline;
use crate::constructive::{best_pair_insertion, PairInsertion, EPSILON};
use crate::evaluation::FeasibilityChecker;
use crate::models::{route_cost, ProblemModel, Route, Solution};

struct SwapMove {
    first: (usize, usize, Vec<usize>, PairInsertion),
    second: (usize, usize, Vec<usize>, PairInsertion),
}

/// Applies the first improving swap found scanning pairs of `order`.
///
/// Returns `true` if the solution changed.
pub fn swap(
    problem: &ProblemModel,
    solution: &mut Solution,
    order: &[usize],
    deadline: &Deadline,
) -> bool {
    let index = route_index(problem, solution);

    for (x, &a) in order.iter().enumerate() {
        if deadline.expired() {
            return false;
        }
        let Some(ra) = index[a] else {
            continue;
        };
        for &b in &order[x + 1..] {
            let Some(rb) = index[b] else {
                continue;
            };
            if ra == rb {
                continue;
            }
            if let Some(mv) = try_swap(problem, solution, (a, ra), (b, rb)) {
                apply(problem, solution, mv);
                return true;
            }
        }
    }
    false
}

/// Prices moving `a` into `b`'s route and `b` into `a`'s route.
fn try_swap(
    problem: &ProblemModel,
    solution: &Solution,
    (a, ra): (usize, usize),
    (b, rb): (usize, usize),
) -> Option<SwapMove> {
    let route_a = solution.route(ra);
    let route_b = solution.route(rb);
    let vehicle_a = problem.vehicle(route_a.vehicle_id());
    let vehicle_b = problem.vehicle(route_b.vehicle_id());

    // b goes where a was
    let reduced_a = without_pair(problem, route_a.nodes(), a);
    let into_a = best_pair_insertion(&FeasibilityChecker::new(problem, &vehicle_a), &reduced_a, b)?;
    let reduced_b = without_pair(problem, route_b.nodes(), b);
    let into_b = best_pair_insertion(&FeasibilityChecker::new(problem, &vehicle_b), &reduced_b, a)?;

    let delta = vehicle_a.route_cost(into_a.metrics.distance)
        + vehicle_b.route_cost(into_b.metrics.distance)
        - route_cost(route_a, &vehicle_a)
        - route_cost(route_b, &vehicle_b);
    if delta >= -EPSILON {
        return None;
    }

    Some(SwapMove {
        first: (ra, b, reduced_a, into_a),
        second: (rb, a, reduced_b, into_b),
    })
}

fn apply(problem: &ProblemModel, solution: &mut Solution, mv: SwapMove) {
    for (r, shipment, reduced, insertion) in [mv.first, mv.second] {
        let vehicle = problem.vehicle(solution.route(r).vehicle_id());
        let nodes = insertion.apply(
            &reduced,
            problem.pickup_of(shipment),
            problem.delivery_of(shipment),
        );
        let route = Route::with_sequence(vehicle.id(), nodes, insertion.metrics);
        solution.replace_route(r, route, &vehicle);
    }
}
