//! Intra-route reversal of sibling blocks.
//!
//! # Algorithm
//!
//! A LIFO route is a nesting of shipments: each shipment's pickup and
//! delivery enclose a run of complete *blocks* (shipments loaded and unloaded
//! while it sits underneath). Reversing a raw node segment would almost
//! always unload a pallet from under another, so this operator reverses the
//! order of consecutive sibling blocks instead, keeping each block intact:
//!
//! ```text
//! [p1 d1] [p2 p3 d3 d2] [p4 d4]   →   [p4 d4] [p2 p3 d3 d2] [p1 d1]
//! ```
//!
//! Only the edges at block boundaries change, so the distance delta is
//! computed in O(m) for m blocks before the candidate is checked.
//!
//! # Complexity
//!
//! O(L²) candidates per route of L stops, each O(L) to check.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::support::route_index;
use super::Deadline;
use crate::constructive::EPSILON;
use crate::distance::CostMatrix;
use crate::evaluation::FeasibilityChecker;
use crate::models::{route_cost, NodeKind, ProblemModel, Route, Solution};

/// Applies the first improving block reversal, trying the segments that
/// start at each shipment's pickup in `order`.
///
/// Returns `true` if the solution changed.
pub fn reversal(
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
        let Some(r) = index[shipment] else {
            continue;
        };
        let route = solution.route(r);
        let pickup = problem.pickup_of(shipment);
        let Some(start) = route.nodes().iter().position(|&n| n == pickup) else {
            continue;
        };

        let vehicle = problem.vehicle(route.vehicle_id());
        let checker = FeasibilityChecker::new(problem, &vehicle);
        let nodes = route.nodes();
        let bounds = block_bounds(problem, nodes, start);
        let old_cost = route_cost(route, &vehicle);

        for m in 2..bounds.len() {
            let blocks = &bounds[..=m];
            if reversal_delta(nodes, blocks, problem.costs()) >= -EPSILON {
                continue;
            }
            let candidate = reverse_blocks(nodes, blocks);
            let Ok(metrics) = checker.check(&candidate) else {
                continue;
            };
            if vehicle.route_cost(metrics.distance) < old_cost - EPSILON {
                let updated = Route::with_sequence(vehicle.id(), candidate, metrics);
                solution.replace_route(r, updated, &vehicle);
                return true;
            }
        }
    }
    false
}

/// Boundaries of the sibling blocks starting at `start`.
///
/// Returns `[start, end_1, end_2, ...]` where block `k` spans
/// `bounds[k]..bounds[k + 1]`. The run stops at the delivery of whatever
/// shipment encloses `start`, or at the end of the route.
fn block_bounds(problem: &ProblemModel, nodes: &[usize], start: usize) -> Vec<usize> {
    let mut bounds = vec![start];
    let mut depth: usize = 0;
    for (k, &n) in nodes.iter().enumerate().skip(start) {
        match problem.node(n).kind {
            NodeKind::Pickup => depth += 1,
            NodeKind::Delivery => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
        }
        if depth == 0 {
            bounds.push(k + 1);
        }
    }
    bounds
}

/// Distance change from reversing the blocks delimited by `bounds`.
fn reversal_delta(nodes: &[usize], bounds: &[usize], costs: &CostMatrix) -> f64 {
    let m = bounds.len() - 1;
    let first = |k: usize| nodes[bounds[k]];
    let last = |k: usize| nodes[bounds[k + 1] - 1];
    let prev = bounds[0].checked_sub(1).map(|i| nodes[i]);
    let next = nodes.get(bounds[m]).copied();

    let mut delta = 0.0;
    if let Some(p) = prev {
        delta += costs.distance(p, first(m - 1)) - costs.distance(p, first(0));
    }
    if let Some(q) = next {
        delta += costs.distance(last(0), q) - costs.distance(last(m - 1), q);
    }
    for k in 0..m - 1 {
        delta += costs.distance(last(k + 1), first(k)) - costs.distance(last(k), first(k + 1));
    }
    delta
}

fn reverse_blocks(nodes: &[usize], bounds: &[usize]) -> Vec<usize> {
    let m = bounds.len() - 1;
    let mut out = Vec::with_capacity(nodes.len());
    out.extend_from_slice(&nodes[..bounds[0]]);
    for k in (0..m).rev() {
        out.extend_from_slice(&nodes[bounds[k]..bounds[k + 1]]);
    }
    out.extend_from_slice(&nodes[bounds[m]..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FleetConfig;
    use crate::test_support::{problem, shipment};

    fn single_route(p: &ProblemModel, nodes: Vec<usize>) -> Solution {
        let v = p.vehicle(0);
        let metrics = FeasibilityChecker::new(p, &v).check(&nodes).expect("feasible");
        let mut sol = Solution::new();
        sol.push_route(Route::with_sequence(0, nodes, metrics), &v);
        sol
    }

    #[test]
    fn test_block_bounds() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (20.0, 0.0), 5),
                shipment("S2", (15.0, 0.0), (16.0, 0.0), 5),
                shipment("S3", (5.0, 0.0), (6.0, 0.0), 5),
            ],
            &FleetConfig::default(),
        );
        let nodes = [0, 2, 3, 4, 5, 1];
        assert_eq!(block_bounds(&p, &nodes, 0), vec![0, 6]);
        assert_eq!(block_bounds(&p, &nodes, 1), vec![1, 3, 5]);
        assert_eq!(reverse_blocks(&nodes, &[1, 3, 5]), vec![0, 4, 5, 2, 3, 1]);
    }

    #[test]
    fn test_delta_matches_recomputed_distance() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (1.0, 3.0), 5),
                shipment("S2", (10.0, 2.0), (11.0, 0.0), 5),
                shipment("S3", (5.0, 7.0), (6.0, 0.0), 5),
                shipment("S4", (2.0, 2.0), (9.0, 9.0), 5),
            ],
            &FleetConfig::default(),
        );
        let nodes = [0, 1, 2, 4, 5, 3, 6, 7];
        for start in [0, 2, 3] {
            let bounds = block_bounds(&p, &nodes, start);
            for m in 2..bounds.len() {
                let blocks = &bounds[..=m];
                let expected = p.costs().path_distance(&reverse_blocks(&nodes, blocks))
                    - p.costs().path_distance(&nodes);
                let delta = reversal_delta(&nodes, blocks, p.costs());
                assert!((delta - expected).abs() < 1e-9, "start={start} m={m}");
            }
        }
    }

    #[test]
    fn test_reversal_reorders_top_level_blocks() {
        // S1 at 0, S2 at 10, S3 at 5: visiting S3 before S2 saves the backtrack
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (1.0, 0.0), 5),
                shipment("S2", (10.0, 0.0), (11.0, 0.0), 5),
                shipment("S3", (5.0, 0.0), (6.0, 0.0), 5),
            ],
            &FleetConfig::default(),
        );
        let mut sol = single_route(&p, vec![0, 1, 2, 3, 4, 5]);
        assert!((sol.total_distance() - 18.0).abs() < 1e-9);

        assert!(reversal(&p, &mut sol, &[0, 1, 2], &Deadline::never()));
        assert_eq!(sol.route(0).nodes(), &[0, 1, 4, 5, 2, 3]);
        assert!((sol.total_distance() - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversal_inside_enclosing_shipment() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (20.0, 0.0), 5),
                shipment("S2", (15.0, 0.0), (16.0, 0.0), 5),
                shipment("S3", (5.0, 0.0), (6.0, 0.0), 5),
            ],
            &FleetConfig::default(),
        );
        let mut sol = single_route(&p, vec![0, 2, 3, 4, 5, 1]);
        assert!(reversal(&p, &mut sol, &[1], &Deadline::never()));
        assert_eq!(sol.route(0).nodes(), &[0, 4, 5, 2, 3, 1]);
        assert!((sol.total_distance() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversal_no_change_when_optimal() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (1.0, 0.0), 5),
                shipment("S2", (2.0, 0.0), (3.0, 0.0), 5),
            ],
            &FleetConfig::default(),
        );
        let mut sol = single_route(&p, vec![0, 1, 2, 3]);
        assert!(!reversal(&p, &mut sol, &[0, 1], &Deadline::never()));
    }
}
