//! Vehicle type with capacity, route limits and cost parameters.

/// A vehicle that services one route.
///
/// # Examples
///
/// ```
/// use pallet_routing::models::Vehicle;
///
/// let v = Vehicle::new(0, 26, 800.0);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 26);
/// assert_eq!(v.label(), "vehicle-1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: usize,
    capacity: u32,
    max_distance: f64,
    max_duration: Option<f64>,
    cost_per_distance: f64,
    fixed_cost: f64,
}

impl Vehicle {
    /// Creates a vehicle with the given index, pallet capacity and distance limit.
    ///
    /// Default: cost_per_distance = 1.0, no fixed cost, no duration limit.
    pub fn new(id: usize, capacity: u32, max_distance: f64) -> Self {
        Self {
            id,
            capacity,
            max_distance,
            max_duration: None,
            cost_per_distance: 1.0,
            fixed_cost: 0.0,
        }
    }

    /// Sets maximum route duration.
    pub fn with_max_duration(mut self, max: f64) -> Self {
        self.max_duration = Some(max);
        self
    }

    /// Sets cost per unit distance.
    pub fn with_cost_per_distance(mut self, cost: f64) -> Self {
        self.cost_per_distance = cost;
        self
    }

    /// Sets fixed cost for using this vehicle.
    pub fn with_fixed_cost(mut self, cost: f64) -> Self {
        self.fixed_cost = cost;
        self
    }

    /// Index of this vehicle in the fleet pool.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Human-readable identifier (`vehicle-1`, `vehicle-2`, ...).
    pub fn label(&self) -> String {
        format!("vehicle-{}", self.id + 1)
    }

    /// Pallet capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Maximum route distance.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Maximum route duration, if any.
    pub fn max_duration(&self) -> Option<f64> {
        self.max_duration
    }

    /// Cost per unit distance traveled.
    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }

    /// Fixed cost for using this vehicle (independent of distance).
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    /// Cost of driving a route of the given length with this vehicle.
    pub fn route_cost(&self, distance: f64) -> f64 {
        distance * self.cost_per_distance + self.fixed_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(0, 26, 800.0);
        assert_eq!(v.id(), 0);
        assert_eq!(v.capacity(), 26);
        assert_eq!(v.max_distance(), 800.0);
        assert_eq!(v.cost_per_distance(), 1.0);
        assert_eq!(v.fixed_cost(), 0.0);
        assert!(v.max_duration().is_none());
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new(1, 20, 500.0)
            .with_cost_per_distance(1.5)
            .with_fixed_cost(50.0)
            .with_max_duration(480.0);
        assert_eq!(v.label(), "vehicle-2");
        assert_eq!(v.cost_per_distance(), 1.5);
        assert_eq!(v.fixed_cost(), 50.0);
        assert_eq!(v.max_duration(), Some(480.0));
    }

    #[test]
    fn test_route_cost() {
        let v = Vehicle::new(0, 26, 800.0)
            .with_cost_per_distance(2.0)
            .with_fixed_cost(100.0);
        assert!((v.route_cost(10.0) - 120.0).abs() < 1e-10);
    }
}
