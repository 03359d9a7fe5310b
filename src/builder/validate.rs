//! Pure input validation.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{FleetConfig, Shipment, MAX_PALLETS_PER_SHIPMENT};

/// Checks shipments and fleet configuration without solving.
///
/// Reports every problem found. A shipment must carry between 1 and
/// [`MAX_PALLETS_PER_SHIPMENT`] pallets, except that a count above the
/// vehicle capacity is not an error here; such shipments are reported as
/// `CAPACITY_EXCEEDED` by the solve instead.
///
/// # Examples
///
/// ```
/// use pallet_routing::builder::validate;
/// use pallet_routing::models::{FleetConfig, Location, Shipment};
///
/// let ok = Shipment::new("S1", Location::new("A", "XX"), Location::new("B", "XX"), 5);
/// assert!(validate(&[ok.clone()], &FleetConfig::default()).is_empty());
///
/// let errors = validate(&[ok.clone(), ok], &FleetConfig::new(0, 800.0));
/// assert_eq!(errors.len(), 2); // max_vehicles = 0 and a duplicate id
/// ```
pub fn validate(shipments: &[Shipment], fleet: &FleetConfig) -> Vec<ValidationError> {
    let mut errors = validate_fleet(fleet);
    if shipments.len() > fleet.max_shipments {
        errors.push(ValidationError::TooManyShipments {
            count: shipments.len(),
            max: fleet.max_shipments,
        });
    }

    let mut seen = HashSet::new();
    for (index, shipment) in shipments.iter().enumerate() {
        if shipment.id.is_empty() {
            errors.push(ValidationError::EmptyShipmentId { index });
        } else if !seen.insert(shipment.id.as_str()) {
            errors.push(ValidationError::DuplicateShipmentId {
                shipment_id: shipment.id.clone(),
            });
        }
        if !pallet_count_allowed(shipment.pallet_count, fleet.vehicle_capacity) {
            errors.push(ValidationError::PalletCountOutOfRange {
                shipment_id: shipment.id.clone(),
                pallet_count: shipment.pallet_count,
            });
        }
    }

    errors
}

fn validate_fleet(fleet: &FleetConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if fleet.max_vehicles == 0 {
        errors.push(ValidationError::NonPositiveLimit {
            field: "max_vehicles",
            value: 0.0,
        });
    }
    if fleet.vehicle_capacity == 0 {
        errors.push(ValidationError::NonPositiveLimit {
            field: "vehicle_capacity",
            value: 0.0,
        });
    }
    if !is_positive(fleet.max_distance) {
        errors.push(ValidationError::NonPositiveLimit {
            field: "max_distance",
            value: fleet.max_distance,
        });
    }
    if let Some(max) = fleet.max_duration {
        if !is_positive(max) {
            errors.push(ValidationError::NonPositiveLimit {
                field: "max_duration",
                value: max,
            });
        }
    }
    if !is_non_negative(fleet.time_limit_seconds) {
        errors.push(ValidationError::InvalidTimeLimit {
            value: fleet.time_limit_seconds,
        });
    }
    if !is_non_negative(fleet.cost_per_distance) {
        errors.push(ValidationError::InvalidCost {
            field: "cost_per_distance",
            value: fleet.cost_per_distance,
        });
    }
    if !is_non_negative(fleet.fixed_cost) {
        errors.push(ValidationError::InvalidCost {
            field: "fixed_cost",
            value: fleet.fixed_cost,
        });
    }

    errors
}

/// Counts above capacity are left to the capacity rejection.
fn pallet_count_allowed(pallet_count: u32, capacity: u32) -> bool {
    pallet_count > 0 && (pallet_count <= MAX_PALLETS_PER_SHIPMENT || pallet_count > capacity)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
