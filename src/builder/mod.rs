//! Problem construction: shipments and fleet configuration in, node model out.

mod validate;

pub use validate::validate;

use log::debug;

use crate::distance::{CostMatrix, DistanceProvider};
use crate::error::{SolveError, ValidationError};
use crate::models::{FleetConfig, Location, ProblemModel, Shipment};

/// Validates the input and builds the pickup/delivery node model.
///
/// Shipments whose pallet count exceeds the vehicle capacity are kept aside
/// as rejected and never reach the search. Every ordered pair of remaining
/// node locations is looked up once in `provider`.
///
/// # Errors
///
/// [`SolveError::Validation`] if [`validate`] reports anything, or if the
/// provider has no (or an invalid) cost for a needed leg.
///
/// # Examples
///
/// ```
/// use pallet_routing::builder::build;
/// use pallet_routing::distance::TravelCost;
/// use pallet_routing::models::{FleetConfig, Location, Shipment};
///
/// let shipments = vec![
///     Shipment::new("S1", Location::new("A", "XX"), Location::new("B", "XX"), 10),
///     Shipment::new("S2", Location::new("C", "XX"), Location::new("D", "XX"), 30),
/// ];
/// let provider = |_: &Location, _: &Location| Some(TravelCost::new(50.0, 40.0));
///
/// let problem = build(&shipments, &FleetConfig::default(), &provider).unwrap();
/// assert_eq!(problem.num_shipments(), 1);
/// assert_eq!(problem.rejected()[0].id, "S2");
/// assert_eq!(problem.costs().distance(0, 1), 50.0);
/// ```
pub fn build<P>(
    shipments: &[Shipment],
    fleet: &FleetConfig,
    provider: &P,
) -> Result<ProblemModel, SolveError>
where
    P: DistanceProvider + ?Sized,
{
    let errors = validate(shipments, fleet);
    if !errors.is_empty() {
        return Err(SolveError::Validation(errors));
    }

    let (accepted, rejected): (Vec<Shipment>, Vec<Shipment>) = shipments
        .iter()
        .cloned()
        .partition(|s| s.pallet_count <= fleet.vehicle_capacity);

    let locations: Vec<&Location> = accepted
        .iter()
        .flat_map(|s| [&s.origin, &s.destination])
        .collect();
    let costs = lookup_costs(&locations, provider)?;

    debug!(
        "built problem: {} shipments, {} nodes, {} rejected for capacity",
        accepted.len(),
        locations.len(),
        rejected.len()
    );

    Ok(ProblemModel::from_parts(accepted, rejected, fleet.clone(), costs))
}

fn lookup_costs<P>(locations: &[&Location], provider: &P) -> Result<CostMatrix, SolveError>
where
    P: DistanceProvider + ?Sized,
{
    let mut costs = CostMatrix::new(locations.len());
    for (i, from) in locations.iter().enumerate() {
        for (j, to) in locations.iter().enumerate() {
            if i == j {
                continue;
            }
            match provider.cost(from, to) {
                Some(cost) if cost.is_valid() => costs.set(i, j, cost),
                Some(_) => {
                    return Err(SolveError::Validation(vec![
                        ValidationError::InvalidTravelCost {
                            from: from.key(),
                            to: to.key(),
                        },
                    ]))
                }
                None => {
                    return Err(SolveError::Validation(vec![
                        ValidationError::UnresolvedLocation {
                            from: from.key(),
                            to: to.key(),
                        },
                    ]))
                }
            }
        }
    }
    Ok(costs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{LocationTable, TravelCost};
    use crate::models::NodeKind;
    use crate::test_support::{planar, shipment};

    #[test]
    fn test_build_nodes_and_costs() {
        let shipments = vec![
            shipment("S1", (0.0, 0.0), (3.0, 4.0), 10),
            shipment("S2", (3.0, 4.0), (3.0, 0.0), 5),
        ];
        let problem = build(&shipments, &FleetConfig::default(), &planar).expect("valid");
        assert_eq!(problem.nodes().len(), 4);
        assert_eq!(problem.node(0).kind, NodeKind::Pickup);
        assert!((problem.costs().distance(0, 1) - 5.0).abs() < 1e-10);
        assert!((problem.costs().distance(1, 2)).abs() < 1e-10);
        assert!((problem.costs().distance(2, 3) - 4.0).abs() < 1e-10);
        assert!(problem.rejected().is_empty());
    }

    #[test]
    fn test_oversized_rejected() {
        let shipments = vec![
            shipment("BIG", (0.0, 0.0), (1.0, 0.0), 30),
            shipment("S1", (0.0, 0.0), (1.0, 0.0), 26),
        ];
        let problem = build(&shipments, &FleetConfig::default(), &planar).expect("valid");
        assert_eq!(problem.num_shipments(), 1);
        assert_eq!(problem.shipment(0).id, "S1");
        assert_eq!(problem.rejected().len(), 1);
        assert_eq!(problem.rejected()[0].id, "BIG");
    }

    #[test]
    fn test_invalid_fleet_fails() {
        let err = build(
            &[shipment("S1", (0.0, 0.0), (1.0, 0.0), 5)],
            &FleetConfig::new(0, 800.0),
            &planar,
        )
        .expect_err("max_vehicles = 0");
        assert_eq!(err.errors().len(), 1);
    }

    #[test]
    fn test_unresolved_location() {
        let table = LocationTable::new(["A, XX"]);
        let shipments = vec![Shipment::new(
            "S1",
            Location::new("A", "XX"),
            Location::new("Z", "XX"),
            5,
        )];
        let err = build(&shipments, &FleetConfig::default(), &table).expect_err("unknown");
        assert_eq!(
            err.errors(),
            &[ValidationError::UnresolvedLocation {
                from: "A, XX".into(),
                to: "Z, XX".into()
            }]
        );
    }

    #[test]
    fn test_negative_cost_rejected() {
        let provider = |_: &Location, _: &Location| Some(TravelCost::new(-1.0, 1.0));
        let err = build(
            &[shipment("S1", (0.0, 0.0), (1.0, 0.0), 5)],
            &FleetConfig::default(),
            &provider,
        )
        .expect_err("negative distance");
        assert!(matches!(
            err.errors()[0],
            ValidationError::InvalidTravelCost { .. }
        ));
    }

    #[test]
    fn test_dyn_provider() {
        let provider: &dyn DistanceProvider = &planar;
        let problem = build(
            &[shipment("S1", (0.0, 0.0), (1.0, 0.0), 5)],
            &FleetConfig::default(),
            provider,
        )
        .expect("valid");
        assert_eq!(problem.num_shipments(), 1);
    }
}
