//! Cheapest feasible insertion for pickup-delivery pairs.
//!
//! # Algorithm
//!
//! Shipments are taken one at a time in a fixed order (largest pallet count
//! first, ties by id). Each is inserted where it adds the least cost over
//! every open route and, while the fleet allows, a fresh route. Within a
//! route every pickup/delivery position pair that keeps the stack nesting
//! intact is priced; ties go to the lower resulting peak load. A shipment
//! with no feasible placement is left unassigned.
//!
//! # Complexity
//!
//! O(n · R · L³) worst case for n shipments, R routes of L stops, since each
//! of the O(L²) position pairs may need an O(L) feasibility walk. In practice
//! the stack-balance filter and the O(1) delta bound skip most checks.
//!
//! # Reference
//!
//! Solomon, M.M. (1987). "Algorithms for the Vehicle Routing and Scheduling
//! Problems with Time Window Constraints", *Operations Research* 35(2), 254-265.

use log::debug;

use super::insertion::{apply_placement, cheapest_placement};
use crate::models::{ProblemModel, Solution, Unassigned, UnassignedReason};

/// Deterministic construction order: pallet count descending, then shipment id.
///
/// # Examples
///
/// ```
/// use pallet_routing::builder::build;
/// use pallet_routing::constructive::canonical_order;
/// use pallet_routing::distance::TravelCost;
/// use pallet_routing::models::{FleetConfig, Location, Shipment};
///
/// let loc = Location::new("A", "XX");
/// let shipments = vec![
///     Shipment::new("B", loc.clone(), loc.clone(), 5),
///     Shipment::new("C", loc.clone(), loc.clone(), 12),
///     Shipment::new("A", loc.clone(), loc.clone(), 5),
/// ];
/// let provider = |_: &Location, _: &Location| Some(TravelCost::default());
/// let problem = build(&shipments, &FleetConfig::default(), &provider).unwrap();
/// assert_eq!(canonical_order(&problem), vec![1, 2, 0]);
/// ```
pub fn canonical_order(problem: &ProblemModel) -> Vec<usize> {
    let mut order: Vec<usize> = (0..problem.num_shipments()).collect();
    order.sort_by(|&a, &b| {
        let (sa, sb) = (problem.shipment(a), problem.shipment(b));
        sb.pallet_count
            .cmp(&sa.pallet_count)
            .then_with(|| sa.id.cmp(&sb.id))
    });
    order
}

/// Builds an initial solution by cheapest feasible insertion in `order`.
///
/// Every shipment in `order` ends up either in exactly one route or in the
/// unassigned list with reason `NO_FEASIBLE_ROUTE`.
///
/// # Examples
///
/// ```
/// use pallet_routing::builder::build;
/// use pallet_routing::constructive::{canonical_order, cheapest_insertion};
/// use pallet_routing::distance::TravelCost;
/// use pallet_routing::models::{FleetConfig, Location, Shipment};
///
/// let a = Location::new("A", "XX");
/// let b = Location::new("B", "XX");
/// let shipments = vec![
///     Shipment::new("S1", a.clone(), b.clone(), 20),
///     Shipment::new("S2", a.clone(), b.clone(), 20),
/// ];
/// let provider = |x: &Location, y: &Location| {
///     Some(if x == y { TravelCost::default() } else { TravelCost::new(100.0, 90.0) })
/// };
/// let problem = build(&shipments, &FleetConfig::new(1, 800.0), &provider).unwrap();
///
/// let solution = cheapest_insertion(&problem, &canonical_order(&problem));
/// // 20 + 20 pallets never share the truck, but one after the other they do
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.num_served(), 2);
/// assert_eq!(solution.route(0).peak_load(), 20);
/// ```
pub fn cheapest_insertion(problem: &ProblemModel, order: &[usize]) -> Solution {
    let mut solution = Solution::new();

    for &shipment in order {
        match cheapest_placement(problem, &solution, shipment) {
            Some(placement) => apply_placement(problem, &mut solution, shipment, &placement),
            None => {
                debug!(
                    "no feasible route for shipment {}",
                    problem.shipment(shipment).id
                );
                solution.add_unassigned(Unassigned {
                    shipment,
                    reason: UnassignedReason::NoFeasibleRoute,
                });
            }
        }
    }

    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::FeasibilityChecker;
    use crate::models::FleetConfig;
    use crate::test_support::{problem, shipment};

    #[test]
    fn test_empty() {
        let p = problem(&[], &FleetConfig::default());
        let sol = cheapest_insertion(&p, &canonical_order(&p));
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_unassigned(), 0);
    }

    #[test]
    fn test_far_apart_shipments_get_own_routes() {
        // each alone is 10 long, chaining them needs a 1000 long deadhead
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 10),
                shipment("S2", (1000.0, 0.0), (1010.0, 0.0), 15),
            ],
            &FleetConfig::new(10, 800.0),
        );
        let sol = cheapest_insertion(&p, &canonical_order(&p));
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_unassigned(), 0);
        assert!((sol.total_distance() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossing_shipments_nest_or_separate() {
        // S1 0 → 10, S2 5 → 15: the naive 0,5,10,15 order unloads S1 from under S2
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 10),
                shipment("S2", (5.0, 0.0), (15.0, 0.0), 10),
            ],
            &FleetConfig::new(1, 800.0),
        );
        let v = p.vehicle(0);
        let checker = FeasibilityChecker::new(&p, &v);
        assert!(!checker.is_feasible(&[0, 2, 1, 3]));

        let sol = cheapest_insertion(&p, &canonical_order(&p));
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.num_unassigned(), 0);
        let nodes = sol.route(0).nodes();
        assert!(checker.is_feasible(nodes));
        assert_ne!(nodes, &[0, 2, 1, 3]);
    }

    #[test]
    fn test_single_vehicle_overflow() {
        // one truck, 20 + 20 pallets, and the truck can't make two trips
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (300.0, 0.0), 20),
                shipment("S2", (0.0, 1.0), (300.0, 1.0), 20),
            ],
            &FleetConfig::new(1, 400.0),
        );
        let sol = cheapest_insertion(&p, &canonical_order(&p));
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.num_served(), 1);
        assert_eq!(
            sol.unassigned(),
            &[Unassigned {
                shipment: 1,
                reason: UnassignedReason::NoFeasibleRoute
            }]
        );
    }

    #[test]
    fn test_deterministic() {
        let shipments: Vec<_> = (0..12)
            .map(|k| {
                let x = (k * 7 % 13) as f64 * 10.0;
                let y = (k * 5 % 11) as f64 * 10.0;
                shipment(&format!("S{k:02}"), (x, y), (y, x), 3 + (k % 5) as u32 * 4)
            })
            .collect();
        let p = problem(&shipments, &FleetConfig::new(4, 2000.0));
        let a = cheapest_insertion(&p, &canonical_order(&p));
        let b = cheapest_insertion(&p, &canonical_order(&p));
        assert_eq!(a, b);
        assert_eq!(a.num_served() + a.num_unassigned(), 12);
    }
}
