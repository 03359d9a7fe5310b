//! Serializable result records.

use serde::{Deserialize, Serialize};

use crate::models::{NodeKind, Shipment, UnassignedReason};

/// One stop of a route: which shipment, and whether it is loaded or unloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopView {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub shipment: Shipment,
}

/// One vehicle's route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    /// `route-1`, `route-2`, ... in route order.
    pub id: String,
    /// Label of the vehicle driving the route.
    pub vehicle: String,
    pub stops: Vec<StopView>,
    /// Sum of the legs between consecutive stops, in km.
    pub total_distance: f64,
    /// Pallets of all shipments on the route.
    pub total_pallets: u32,
}

impl RouteView {
    /// Shipment ids in pickup order.
    pub fn shipment_ids(&self) -> impl Iterator<Item = &str> {
        self.stops
            .iter()
            .filter(|s| s.kind == NodeKind::Pickup)
            .map(|s| s.shipment.id.as_str())
    }
}

/// A shipment left out of every route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnassignedView {
    pub shipment: Shipment,
    pub reason: UnassignedReason,
}

/// The full result of a solve.
///
/// # Examples
///
/// ```
/// use pallet_routing::extraction::SolutionView;
///
/// let view = SolutionView::default();
/// let json = view.to_json().unwrap();
/// assert!(json.contains("\"unassigned_shipments\""));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionView {
    pub routes: Vec<RouteView>,
    pub total_distance: f64,
    pub total_cost: f64,
    pub unassigned_shipments: Vec<UnassignedView>,
}

impl SolutionView {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Number of shipments placed on a route.
    pub fn num_assigned(&self) -> usize {
        self.routes.iter().map(|r| r.stops.len() / 2).sum()
    }

    /// Route serving the shipment with this id, if any.
    pub fn route_of(&self, shipment_id: &str) -> Option<&RouteView> {
        self.routes
            .iter()
            .find(|r| r.shipment_ids().any(|id| id == shipment_id))
    }
}
