//! Shipment relocation.
//!
//! # Algorithm
//!
//! Takes a shipment's pickup/delivery pair out of its route and reinserts it
//! at the cheapest feasible position pair, either in the same route, in
//! another open route, or in a fresh route when the fleet has one to spare.
//! Shipments are scanned in the given order; the first shipment whose best
//! move lowers total cost is moved (first-improvement over shipments,
//! best-improvement over destinations).
//!
//! # Complexity
//!
//! O(n · R · L³) worst case per call for n shipments, R routes of L stops.
//!
//! # Reference
//!
//! Savelsbergh, M.W.P. (1992). "The Vehicle Routing Problem with Time
//! Windows: Minimizing Route Duration", *ORSA Journal on Computing* 4(2).

use super::support::{route_index, without_pair};
use super::Deadline;
use crate::constructive::{best_pair_insertion, PairInsertion, EPSILON};
use crate::evaluation::FeasibilityChecker;
use crate::models::{route_cost, ProblemModel, Route, RouteMetrics, Solution};

#[derive(Debug, Clone, Copy)]
enum Destination {
    SameRoute,
    Route(usize),
    NewRoute(usize),
}

#[derive(Debug, Clone)]
struct RelocateMove {
    shipment: usize,
    from_route: usize,
    /// The source route without the shipment.
    reduced: Vec<usize>,
    reduced_metrics: RouteMetrics,
    destination: Destination,
    insertion: PairInsertion,
    delta: f64,
}

/// Applies the first improving relocation found scanning `order`.
///
/// Returns `true` if the solution changed. Routes emptied by the move are
/// dropped. Gives up without a move once `deadline` passes.
pub fn relocate(
    problem: &ProblemModel,
    solution: &mut Solution,
    order: &[usize],
    deadline: &Deadline,
) -> bool {
    let index = route_index(problem, solution);

    for &shipment in order {
        if deadline.expired() {
            return false;
        }
        let Some(from_route) = index[shipment] else {
            continue;
        };
        if let Some(mv) = find_best_relocate(problem, solution, shipment, from_route) {
            apply(problem, solution, mv);
            return true;
        }
    }
    false
}

fn find_best_relocate(
    problem: &ProblemModel,
    solution: &Solution,
    shipment: usize,
    from_route: usize,
) -> Option<RelocateMove> {
    let route = solution.route(from_route);
    let vehicle = problem.vehicle(route.vehicle_id());
    let checker = FeasibilityChecker::new(problem, &vehicle);
    let reduced = without_pair(problem, route.nodes(), shipment);
    let reduced_metrics = checker.check(&reduced).ok()?;
    let old_cost = route_cost(route, &vehicle);
    let reduced_cost = if reduced.is_empty() {
        0.0
    } else {
        vehicle.route_cost(reduced_metrics.distance)
    };
    let removal_delta = reduced_cost - old_cost;

    let mut best: Option<RelocateMove> = None;
    let mut consider = |destination: Destination, insertion: PairInsertion, delta: f64| {
        if delta < -EPSILON && best.as_ref().is_none_or(|b| delta < b.delta - EPSILON) {
            best = Some(RelocateMove {
                shipment,
                from_route,
                reduced: Vec::new(),
                reduced_metrics,
                destination,
                insertion,
                delta,
            });
        }
    };

    if let Some(ins) = best_pair_insertion(&checker, &reduced, shipment) {
        let delta = vehicle.route_cost(ins.metrics.distance) - old_cost;
        consider(Destination::SameRoute, ins, delta);
    }

    for (to_route, target) in solution.routes().iter().enumerate() {
        if to_route == from_route {
            continue;
        }
        let to_vehicle = problem.vehicle(target.vehicle_id());
        let to_checker = FeasibilityChecker::new(problem, &to_vehicle);
        if let Some(ins) = best_pair_insertion(&to_checker, target.nodes(), shipment) {
            let delta = removal_delta + to_vehicle.route_cost(ins.metrics.distance)
                - route_cost(target, &to_vehicle);
            consider(Destination::Route(to_route), ins, delta);
        }
    }

    // moving the only shipment of a route into a new one is a same-route move
    if !reduced.is_empty() && solution.num_routes() < problem.max_vehicles() {
        let new_vehicle = problem.vehicle(solution.next_vehicle_id());
        let new_checker = FeasibilityChecker::new(problem, &new_vehicle);
        if let Some(ins) = best_pair_insertion(&new_checker, &[], shipment) {
            let delta = removal_delta + new_vehicle.route_cost(ins.metrics.distance);
            consider(Destination::NewRoute(new_vehicle.id()), ins, delta);
        }
    }

    best.map(|mv| RelocateMove { reduced, ..mv })
}

fn apply(problem: &ProblemModel, solution: &mut Solution, mv: RelocateMove) {
    let pickup = problem.pickup_of(mv.shipment);
    let delivery = problem.delivery_of(mv.shipment);
    let from_vehicle = problem.vehicle(solution.route(mv.from_route).vehicle_id());

    match mv.destination {
        Destination::SameRoute => {
            let nodes = mv.insertion.apply(&mv.reduced, pickup, delivery);
            let route = Route::with_sequence(from_vehicle.id(), nodes, mv.insertion.metrics);
            solution.replace_route(mv.from_route, route, &from_vehicle);
            return;
        }
        Destination::Route(to_route) => {
            let target = solution.route(to_route);
            let to_vehicle = problem.vehicle(target.vehicle_id());
            let nodes = mv.insertion.apply(target.nodes(), pickup, delivery);
            let route = Route::with_sequence(to_vehicle.id(), nodes, mv.insertion.metrics);
            solution.replace_route(to_route, route, &to_vehicle);
        }
        Destination::NewRoute(vehicle_id) => {
            let vehicle = problem.vehicle(vehicle_id);
            let nodes = mv.insertion.apply(&[], pickup, delivery);
            let route = Route::with_sequence(vehicle_id, nodes, mv.insertion.metrics);
            solution.push_route(route, &vehicle);
        }
    }

    let remainder = Route::with_sequence(from_vehicle.id(), mv.reduced, mv.reduced_metrics);
    solution.replace_route(mv.from_route, remainder, &from_vehicle);
    solution.remove_empty_routes();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::{apply_placement, cheapest_placement, Target};
    use crate::models::FleetConfig;
    use crate::test_support::{problem, shipment};

    fn place_in_new_routes(p: &ProblemModel, shipments: &[usize]) -> Solution {
        let mut sol = Solution::new();
        for &s in shipments {
            let mut placement = cheapest_placement(p, &sol, s).expect("placeable");
            if placement.target != Target::NewRoute {
                let vehicle = p.vehicle(sol.next_vehicle_id());
                let checker = FeasibilityChecker::new(p, &vehicle);
                placement.target = Target::NewRoute;
                placement.insertion = best_pair_insertion(&checker, &[], s).expect("fits");
            }
            apply_placement(p, &mut sol, s, &placement);
        }
        sol
    }

    #[test]
    fn test_relocate_merges_nested_shipment() {
        // S2 rides inside S1's span for free, so its own route is pure waste
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 10),
                shipment("S2", (2.0, 0.0), (8.0, 0.0), 10),
            ],
            &FleetConfig::default(),
        );
        let mut sol = place_in_new_routes(&p, &[0, 1]);
        assert_eq!(sol.num_routes(), 2);
        assert!((sol.total_distance() - 16.0).abs() < 1e-9);

        assert!(relocate(&p, &mut sol, &[1, 0], &Deadline::never()));
        assert_eq!(sol.num_routes(), 1);
        assert!((sol.total_distance() - 10.0).abs() < 1e-9);
        assert_eq!(sol.route(0).nodes(), &[0, 2, 3, 1]);
    }

    #[test]
    fn test_relocate_respects_capacity() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 15),
                shipment("S2", (2.0, 0.0), (8.0, 0.0), 15),
            ],
            &FleetConfig::new(2, 800.0),
        );
        let mut sol = place_in_new_routes(&p, &[0, 1]);
        // merging is only possible back to back (0→10→2→8 = 24 > 16)
        assert!(!relocate(&p, &mut sol, &[0, 1], &Deadline::never()));
        assert_eq!(sol.num_routes(), 2);
    }

    #[test]
    fn test_relocate_stops_at_deadline() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 10),
                shipment("S2", (2.0, 0.0), (8.0, 0.0), 10),
            ],
            &FleetConfig::default(),
        );
        let mut sol = place_in_new_routes(&p, &[0, 1]);
        let before = sol.clone();
        assert!(!relocate(&p, &mut sol, &[1, 0], &Deadline::expired_now()));
        assert_eq!(sol, before);
    }
}
