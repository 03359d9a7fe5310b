//! Read-only projection of a solution into output records.

mod view;

pub use view::{RouteView, SolutionView, StopView, UnassignedView};

use crate::models::{ProblemModel, Solution, UnassignedReason};

/// Converts a solution into its serializable form.
///
/// Route distances and totals are recomputed from the cost matrix rather than
/// taken from cached values. Empty routes are skipped. Unassigned shipments
/// list the capacity rejections first, in input order, then the shipments the
/// search could not place, in input order.
///
/// # Examples
///
/// ```
/// use pallet_routing::builder::build;
/// use pallet_routing::constructive::{canonical_order, cheapest_insertion};
/// use pallet_routing::distance::TravelCost;
/// use pallet_routing::extraction::extract;
/// use pallet_routing::models::{FleetConfig, Location, NodeKind, Shipment};
///
/// let a = Location::new("A", "XX");
/// let b = Location::new("B", "XX");
/// let shipments = vec![Shipment::new("S1", a, b, 8)];
/// let provider = |x: &Location, y: &Location| {
///     Some(if x == y { TravelCost::default() } else { TravelCost::new(120.0, 100.0) })
/// };
/// let problem = build(&shipments, &FleetConfig::default(), &provider).unwrap();
/// let solution = cheapest_insertion(&problem, &canonical_order(&problem));
///
/// let view = extract(&problem, &solution);
/// assert_eq!(view.routes[0].id, "route-1");
/// assert_eq!(view.routes[0].vehicle, "vehicle-1");
/// assert_eq!(view.routes[0].stops[0].kind, NodeKind::Pickup);
/// assert_eq!(view.routes[0].total_pallets, 8);
/// assert_eq!(view.total_distance, 120.0);
/// ```
pub fn extract(problem: &ProblemModel, solution: &Solution) -> SolutionView {
    let costs = problem.costs();
    let mut view = SolutionView::default();

    for route in solution.routes().iter().filter(|r| !r.is_empty()) {
        let distance = costs.path_distance(route.nodes());
        let vehicle = problem.vehicle(route.vehicle_id());
        let stops = route
            .nodes()
            .iter()
            .map(|&n| {
                let node = problem.node(n);
                StopView {
                    kind: node.kind,
                    shipment: problem.shipment(node.shipment).clone(),
                }
            })
            .collect();

        view.total_distance += distance;
        view.total_cost += vehicle.route_cost(distance);
        view.routes.push(RouteView {
            id: format!("route-{}", view.routes.len() + 1),
            vehicle: vehicle.label(),
            stops,
            total_distance: distance,
            total_pallets: route.total_pallets(problem),
        });
    }

    view.unassigned_shipments.extend(problem.rejected().iter().map(|s| UnassignedView {
        shipment: s.clone(),
        reason: UnassignedReason::CapacityExceeded,
    }));

    let mut unplaced = solution.unassigned().to_vec();
    unplaced.sort_by_key(|u| u.shipment);
    view.unassigned_shipments.extend(unplaced.iter().map(|u| UnassignedView {
        shipment: problem.shipment(u.shipment).clone(),
        reason: u.reason,
    }));

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FleetConfig, NodeKind, Unassigned};
    use crate::test_support::{problem, shipment};

    fn serde_value(view: &SolutionView) -> serde_json::Value {
        serde_json::to_value(view).expect("serializable")
    }

    #[test]
    fn test_extract_empty_solution() {
        let p = problem(&[], &FleetConfig::default());
        let view = extract(&p, &Solution::new());
        assert!(view.routes.is_empty());
        assert_eq!(view.total_distance, 0.0);
        assert_eq!(view.total_cost, 0.0);
        assert!(view.unassigned_shipments.is_empty());
    }

    #[test]
    fn test_extract_route_fields() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 10),
                shipment("S2", (2.0, 0.0), (8.0, 0.0), 6),
            ],
            &FleetConfig::default().with_costs(2.0, 5.0),
        );
        let mut sol = Solution::new();
        let v = p.vehicle(1);
        let metrics = crate::evaluation::FeasibilityChecker::new(&p, &v)
            .check(&[0, 2, 3, 1])
            .expect("nested");
        sol.push_route(crate::models::Route::with_sequence(1, vec![0, 2, 3, 1], metrics), &v);

        let view = extract(&p, &sol);
        assert_eq!(view.routes.len(), 1);
        let route = &view.routes[0];
        assert_eq!(route.id, "route-1");
        assert_eq!(route.vehicle, "vehicle-2");
        assert_eq!(route.total_pallets, 16);
        assert!((route.total_distance - 10.0).abs() < 1e-9);
        assert!((view.total_cost - 25.0).abs() < 1e-9);
        assert_eq!(route.shipment_ids().collect::<Vec<_>>(), vec!["S1", "S2"]);
        let kinds: Vec<NodeKind> = route.stops.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Pickup,
                NodeKind::Pickup,
                NodeKind::Delivery,
                NodeKind::Delivery
            ]
        );
        assert_eq!(view.route_of("S2").map(|r| r.id.as_str()), Some("route-1"));
        assert_eq!(view.num_assigned(), 2);
    }

    #[test]
    fn test_unassigned_order() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 30),
                shipment("S2", (0.0, 0.0), (10.0, 0.0), 5),
                shipment("S3", (0.0, 0.0), (10.0, 0.0), 5),
                shipment("S4", (0.0, 0.0), (10.0, 0.0), 40),
            ],
            &FleetConfig::default(),
        );
        let mut sol = Solution::new();
        // accepted shipments are S2 (0) and S3 (1)
        for s in [1, 0] {
            sol.add_unassigned(Unassigned {
                shipment: s,
                reason: UnassignedReason::NoFeasibleRoute,
            });
        }
        let view = extract(&p, &sol);
        let ids: Vec<&str> = view
            .unassigned_shipments
            .iter()
            .map(|u| u.shipment.id.as_str())
            .collect();
        assert_eq!(ids, vec!["S1", "S4", "S2", "S3"]);
        assert_eq!(view.unassigned_shipments[0].reason, UnassignedReason::CapacityExceeded);
        assert_eq!(view.unassigned_shipments[3].reason, UnassignedReason::NoFeasibleRoute);
    }

    #[test]
    fn test_json_field_names() {
        let p = problem(
            &[shipment("S1", (0.0, 0.0), (3.0, 4.0), 7)],
            &FleetConfig::default(),
        );
        let sol = crate::constructive::cheapest_insertion(&p, &[0]);
        let value = serde_value(&extract(&p, &sol));

        assert_eq!(value["total_distance"], 5.0);
        let route = &value["routes"][0];
        assert_eq!(route["id"], "route-1");
        assert_eq!(route["vehicle"], "vehicle-1");
        assert_eq!(route["total_pallets"], 7);
        assert_eq!(route["stops"][0]["type"], "pickup");
        assert_eq!(route["stops"][1]["type"], "delivery");
        assert_eq!(route["stops"][0]["shipment"]["id"], "S1");
        assert_eq!(route["stops"][0]["shipment"]["pallet_count"], 7);
        assert!(value["unassigned_shipments"].as_array().is_some_and(|a| a.is_empty()));
    }
}
