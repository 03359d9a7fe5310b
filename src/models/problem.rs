//! The node model a solve works on.

use serde::{Deserialize, Serialize};

use super::{FleetConfig, Shipment, Vehicle};
use crate::distance::CostMatrix;

/// Whether a node loads or unloads its shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Pickup,
    Delivery,
}

/// One endpoint of a shipment's handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Index of the owning shipment in [`ProblemModel::shipments`].
    pub shipment: usize,
    pub kind: NodeKind,
    /// `+pallets` for a pickup, `-pallets` for a delivery.
    pub demand: i32,
}

/// Shipments turned into pickup/delivery node pairs over a cost matrix.
///
/// Shipment `k` owns pickup node `2k` and delivery node `2k + 1`; the
/// precedence "pickup before delivery" follows from that numbering.
/// Shipments too large for any vehicle never enter the node model; they are
/// kept in [`rejected`](Self::rejected).
///
/// # Examples
///
/// ```
/// use pallet_routing::distance::CostMatrix;
/// use pallet_routing::models::{FleetConfig, Location, NodeKind, ProblemModel, Shipment};
///
/// let s = Shipment::new("S1", Location::new("A", "XX"), Location::new("B", "XX"), 4);
/// let problem = ProblemModel::new(vec![s], vec![], FleetConfig::default(), CostMatrix::new(2))
///     .unwrap();
/// assert_eq!(problem.pickup_of(0), 0);
/// assert_eq!(problem.delivery_of(0), 1);
/// assert_eq!(problem.node(1).kind, NodeKind::Delivery);
/// assert_eq!(problem.node(1).demand, -4);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemModel {
    shipments: Vec<Shipment>,
    rejected: Vec<Shipment>,
    nodes: Vec<Node>,
    costs: CostMatrix,
    fleet: FleetConfig,
}

impl ProblemModel {
    /// Assembles a problem from accepted shipments and a node cost matrix.
    ///
    /// Returns `None` if the matrix is not `2 × shipments` square.
    pub fn new(
        shipments: Vec<Shipment>,
        rejected: Vec<Shipment>,
        fleet: FleetConfig,
        costs: CostMatrix,
    ) -> Option<Self> {
        if costs.size() != shipments.len() * 2 {
            return None;
        }
        Some(Self::from_parts(shipments, rejected, fleet, costs))
    }

    /// Assembles a problem whose matrix is already known to match.
    pub(crate) fn from_parts(
        shipments: Vec<Shipment>,
        rejected: Vec<Shipment>,
        fleet: FleetConfig,
        costs: CostMatrix,
    ) -> Self {
        let nodes = shipments
            .iter()
            .enumerate()
            .flat_map(|(k, s)| {
                let pallets = s.pallet_count as i32;
                [
                    Node {
                        shipment: k,
                        kind: NodeKind::Pickup,
                        demand: pallets,
                    },
                    Node {
                        shipment: k,
                        kind: NodeKind::Delivery,
                        demand: -pallets,
                    },
                ]
            })
            .collect();
        Self {
            shipments,
            rejected,
            nodes,
            costs,
            fleet,
        }
    }

    /// Accepted shipments, in input order.
    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    /// Shipment by index.
    pub fn shipment(&self, index: usize) -> &Shipment {
        &self.shipments[index]
    }

    /// Number of accepted shipments.
    pub fn num_shipments(&self) -> usize {
        self.shipments.len()
    }

    /// Shipments rejected up front because they exceed vehicle capacity.
    pub fn rejected(&self) -> &[Shipment] {
        &self.rejected
    }

    /// All nodes; `nodes()[i]` is node `i`.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node by index.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn pickup_of(&self, shipment: usize) -> usize {
        shipment * 2
    }

    pub fn delivery_of(&self, shipment: usize) -> usize {
        shipment * 2 + 1
    }

    /// Shipment owning a node.
    pub fn shipment_of(&self, node: usize) -> usize {
        node / 2
    }

    /// Pallets of a shipment.
    pub fn pallets(&self, shipment: usize) -> u32 {
        self.shipments[shipment].pallet_count
    }

    /// Node-to-node travel costs.
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    pub fn fleet(&self) -> &FleetConfig {
        &self.fleet
    }

    /// Vehicle `index` of the fleet pool.
    pub fn vehicle(&self, index: usize) -> Vehicle {
        self.fleet.vehicle(index)
    }

    /// Maximum number of routes that may be open at once.
    pub fn max_vehicles(&self) -> usize {
        self.fleet.max_vehicles
    }
}
