//! Route and stop types.

use super::{NodeKind, ProblemModel};

/// A placed node with the load on board after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    /// Node index in the problem model.
    pub node: usize,
    /// Owning shipment index.
    pub shipment: usize,
    pub kind: NodeKind,
    /// Pallets on board after this stop.
    pub load_after: u32,
}

/// Aggregates of a feasible node sequence, as computed by the
/// [`FeasibilityChecker`](crate::evaluation::FeasibilityChecker).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteMetrics {
    pub distance: f64,
    pub duration: f64,
    pub peak_load: u32,
}

/// An ordered sequence of pickup and delivery nodes driven by one vehicle.
///
/// A route has no depot: it starts at its first pickup and ends at its last
/// delivery, so its distance is the sum of the legs between consecutive
/// stops.
///
/// # Examples
///
/// ```
/// use pallet_routing::models::{Route, RouteMetrics};
///
/// let metrics = RouteMetrics { distance: 12.0, duration: 20.0, peak_load: 10 };
/// let route = Route::with_sequence(0, vec![0, 1], metrics);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.vehicle_id(), 0);
/// assert_eq!(route.total_distance(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_id: usize,
    nodes: Vec<usize>,
    metrics: RouteMetrics,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            nodes: Vec::new(),
            metrics: RouteMetrics::default(),
        }
    }

    /// Creates a route from an already checked node sequence.
    pub fn with_sequence(vehicle_id: usize, nodes: Vec<usize>, metrics: RouteMetrics) -> Self {
        Self {
            vehicle_id,
            nodes,
            metrics,
        }
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Node indices in visiting order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if this route has no stops.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn metrics(&self) -> RouteMetrics {
        self.metrics
    }

    /// Total distance (set from checked metrics).
    pub fn total_distance(&self) -> f64 {
        self.metrics.distance
    }

    /// Highest load carried at any point.
    pub fn peak_load(&self) -> u32 {
        self.metrics.peak_load
    }

    /// Shipments served, in pickup order.
    pub fn shipments<'a>(&'a self, problem: &'a ProblemModel) -> impl Iterator<Item = usize> + 'a {
        self.nodes
            .iter()
            .map(|&n| problem.node(n))
            .filter(|node| node.kind == NodeKind::Pickup)
            .map(|node| node.shipment)
    }

    /// Returns `true` if the route serves the given shipment.
    pub fn contains_shipment(&self, problem: &ProblemModel, shipment: usize) -> bool {
        self.nodes.contains(&problem.pickup_of(shipment))
    }

    /// Materializes stops with cumulative load.
    pub fn stops(&self, problem: &ProblemModel) -> Vec<Stop> {
        let mut load: i32 = 0;
        self.nodes
            .iter()
            .map(|&n| {
                let node = problem.node(n);
                load += node.demand;
                Stop {
                    node: n,
                    shipment: node.shipment,
                    kind: node.kind,
                    load_after: load.max(0) as u32,
                }
            })
            .collect()
    }

    /// Total pallets handled (sum over served shipments).
    pub fn total_pallets(&self, problem: &ProblemModel) -> u32 {
        self.shipments(problem).map(|s| problem.pallets(s)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::models::{FleetConfig, Location, Shipment};

    fn problem() -> ProblemModel {
        let shipments = vec![
            Shipment::new("S1", Location::new("A", "XX"), Location::new("B", "XX"), 10),
            Shipment::new("S2", Location::new("C", "XX"), Location::new("D", "XX"), 5),
        ];
        ProblemModel::new(shipments, vec![], FleetConfig::default(), CostMatrix::new(4))
            .expect("sizes match")
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new(0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.total_distance(), 0.0);
        assert_eq!(r.peak_load(), 0);
    }

    #[test]
    fn test_stops_track_load() {
        let p = problem();
        let r = Route::with_sequence(0, vec![0, 2, 3, 1], RouteMetrics::default());
        let loads: Vec<u32> = r.stops(&p).iter().map(|s| s.load_after).collect();
        assert_eq!(loads, vec![10, 15, 10, 0]);
        let kinds: Vec<NodeKind> = r.stops(&p).iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Pickup,
                NodeKind::Pickup,
                NodeKind::Delivery,
                NodeKind::Delivery
            ]
        );
    }

    #[test]
    fn test_shipments_in_pickup_order() {
        let p = problem();
        let r = Route::with_sequence(1, vec![2, 3, 0, 1], RouteMetrics::default());
        assert_eq!(r.shipments(&p).collect::<Vec<_>>(), vec![1, 0]);
        assert!(r.contains_shipment(&p, 0));
        assert_eq!(r.total_pallets(&p), 15);
    }
}
