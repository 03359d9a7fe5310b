//! Fleet configuration.

use serde::{Deserialize, Serialize};

use super::{Vehicle, MAX_PALLETS_PER_SHIPMENT};

/// Fleet and search limits for one solve.
///
/// Every field has a default, so a JSON document only needs to name what it
/// overrides.
///
/// # Examples
///
/// ```
/// use pallet_routing::models::FleetConfig;
///
/// let fleet = FleetConfig::new(10, 800.0).with_time_limit(30.0);
/// assert_eq!(fleet.vehicle_capacity, 26);
/// assert_eq!(fleet.vehicle(0).capacity(), 26);
///
/// let parsed = FleetConfig::from_json(r#"{"max_vehicles": 3, "max_distance": 500}"#).unwrap();
/// assert_eq!(parsed.max_vehicles, 3);
/// assert_eq!(parsed.vehicle_capacity, 26);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub max_vehicles: usize,
    pub vehicle_capacity: u32,
    /// Maximum route distance in km.
    pub max_distance: f64,
    /// Search budget; `0` means construction only.
    pub time_limit_seconds: f64,
    /// Maximum route duration in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<f64>,
    pub cost_per_distance: f64,
    pub fixed_cost: f64,
    /// Largest batch a single solve accepts.
    pub max_shipments: usize,
}

impl FleetConfig {
    /// Default trailer capacity in pallets.
    pub const DEFAULT_CAPACITY: u32 = MAX_PALLETS_PER_SHIPMENT;

    /// Default batch size limit.
    pub const DEFAULT_MAX_SHIPMENTS: usize = 1000;

    /// Creates a configuration with the given fleet size and distance limit.
    pub fn new(max_vehicles: usize, max_distance: f64) -> Self {
        Self {
            max_vehicles,
            max_distance,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the pallet capacity of every vehicle.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.vehicle_capacity = capacity;
        self
    }

    /// Sets the search time budget in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    /// Sets the maximum route duration in minutes.
    pub fn with_max_duration(mut self, minutes: f64) -> Self {
        self.max_duration = Some(minutes);
        self
    }

    /// Sets cost per km and fixed cost per used vehicle.
    pub fn with_costs(mut self, cost_per_distance: f64, fixed_cost: f64) -> Self {
        self.cost_per_distance = cost_per_distance;
        self.fixed_cost = fixed_cost;
        self
    }

    /// Sets the largest number of shipments one solve accepts.
    pub fn with_max_shipments(mut self, max_shipments: usize) -> Self {
        self.max_shipments = max_shipments;
        self
    }

    /// Materializes vehicle `index` of the (homogeneous) pool.
    pub fn vehicle(&self, index: usize) -> Vehicle {
        let vehicle = Vehicle::new(index, self.vehicle_capacity, self.max_distance)
            .with_cost_per_distance(self.cost_per_distance)
            .with_fixed_cost(self.fixed_cost);
        match self.max_duration {
            Some(max) => vehicle.with_max_duration(max),
            None => vehicle,
        }
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            max_vehicles: 10,
            vehicle_capacity: Self::DEFAULT_CAPACITY,
            max_distance: 800.0,
            time_limit_seconds: 30.0,
            max_duration: None,
            cost_per_distance: 1.0,
            fixed_cost: 0.0,
            max_shipments: Self::DEFAULT_MAX_SHIPMENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let f = FleetConfig::default();
        assert_eq!(f.max_vehicles, 10);
        assert_eq!(f.vehicle_capacity, 26);
        assert_eq!(f.time_limit_seconds, 30.0);
        assert!(f.max_duration.is_none());
        assert_eq!(f.max_shipments, 1000);
    }

    #[test]
    fn test_vehicle_inherits_limits() {
        let f = FleetConfig::new(2, 300.0)
            .with_capacity(20)
            .with_max_duration(600.0)
            .with_costs(2.0, 10.0);
        let v = f.vehicle(1);
        assert_eq!(v.id(), 1);
        assert_eq!(v.capacity(), 20);
        assert_eq!(v.max_distance(), 300.0);
        assert_eq!(v.max_duration(), Some(600.0));
        assert_eq!(v.cost_per_distance(), 2.0);
        assert_eq!(v.fixed_cost(), 10.0);
    }

    #[test]
    fn test_from_json_partial() {
        let f = FleetConfig::from_json(r#"{"vehicle_capacity": 20, "time_limit_seconds": 0}"#)
            .expect("valid json");
        assert_eq!(f.vehicle_capacity, 20);
        assert_eq!(f.time_limit_seconds, 0.0);
        assert_eq!(f.max_vehicles, 10);
        assert_eq!(f.max_shipments, FleetConfig::DEFAULT_MAX_SHIPMENTS);

        let f = FleetConfig::from_json(r#"{"max_shipments": 50}"#).expect("valid json");
        assert_eq!(f, FleetConfig::default().with_max_shipments(50));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(FleetConfig::from_json("{not json").is_err());
    }
}
