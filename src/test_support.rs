//! Shared fixtures: shipments on a plane, 1 distance unit = 1 minute.

use crate::builder::build;
use crate::distance::TravelCost;
use crate::models::{FleetConfig, Location, ProblemModel, Shipment};

/// Euclidean provider over location coordinates.
pub(crate) fn planar(from: &Location, to: &Location) -> Option<TravelCost> {
    let (ax, ay) = from.coordinates()?;
    let (bx, by) = to.coordinates()?;
    let d = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
    Some(TravelCost::new(d, d))
}

pub(crate) fn at(x: f64, y: f64) -> Location {
    Location::new(format!("P{x}_{y}"), "XX").with_coordinates(x, y)
}

pub(crate) fn shipment(id: &str, from: (f64, f64), to: (f64, f64), pallets: u32) -> Shipment {
    Shipment::new(id, at(from.0, from.1), at(to.0, to.1), pallets)
}

pub(crate) fn problem(shipments: &[Shipment], fleet: &FleetConfig) -> ProblemModel {
    build(shipments, fleet, &planar).expect("valid test problem")
}
