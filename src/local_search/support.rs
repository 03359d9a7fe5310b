//! Helpers shared by the move operators.

use crate::models::{ProblemModel, Solution};

/// Route index serving each shipment, `None` if unserved.
pub(super) fn route_index(problem: &ProblemModel, solution: &Solution) -> Vec<Option<usize>> {
    let mut index = vec![None; problem.num_shipments()];
    for (r, route) in solution.routes().iter().enumerate() {
        for s in route.shipments(problem) {
            index[s] = Some(r);
        }
    }
    index
}

/// `nodes` with both of the shipment's nodes removed.
///
/// Taking a complete pickup/delivery pair out of a nested sequence leaves it
/// nested and never raises the load, but the shorter path may still break
/// distance limits when legs violate the triangle inequality.
pub(super) fn without_pair(problem: &ProblemModel, nodes: &[usize], shipment: usize) -> Vec<usize> {
    let pickup = problem.pickup_of(shipment);
    let delivery = problem.delivery_of(shipment);
    nodes
        .iter()
        .copied()
        .filter(|&n| n != pickup && n != delivery)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::{canonical_order, cheapest_insertion};
    use crate::models::FleetConfig;
    use crate::test_support::{problem, shipment};

    #[test]
    fn test_without_pair() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 10),
                shipment("S2", (2.0, 0.0), (8.0, 0.0), 10),
            ],
            &FleetConfig::default(),
        );
        assert_eq!(without_pair(&p, &[0, 2, 3, 1], 1), vec![0, 1]);
        assert_eq!(without_pair(&p, &[0, 2, 3, 1], 0), vec![2, 3]);
    }

    #[test]
    fn test_route_index() {
        let p = problem(
            &[
                shipment("S1", (0.0, 0.0), (10.0, 0.0), 10),
                shipment("S2", (500.0, 0.0), (510.0, 0.0), 10),
            ],
            &FleetConfig::new(2, 100.0),
        );
        let sol = cheapest_insertion(&p, &canonical_order(&p));
        let index = route_index(&p, &sol);
        assert!(index[0].is_some());
        assert!(index[1].is_some());
        assert_ne!(index[0], index[1]);
    }
}
