//! Shipment and location types.

use serde::{Deserialize, Serialize};

/// Largest pallet count a single shipment may carry (one full trailer).
pub const MAX_PALLETS_PER_SHIPMENT: u32 = 26;

/// A place a shipment is picked up from or delivered to.
///
/// The routing core never interprets a location; it only hands pairs of them
/// to a [`DistanceProvider`](crate::distance::DistanceProvider).
///
/// # Examples
///
/// ```
/// use pallet_routing::models::Location;
///
/// let chicago = Location::new("Chicago", "IL").with_coordinates(41.8781, -87.6298);
/// assert_eq!(chicago.key(), "Chicago, IL");
/// assert_eq!(chicago.coordinates(), Some((41.8781, -87.6298)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Location {
    /// Creates a location without coordinates.
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
            lat: None,
            lng: None,
        }
    }

    /// Attaches geocoded coordinates.
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// `"City, ST"` lookup key.
    pub fn key(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }

    /// Latitude/longitude pair when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lng)
    }
}

/// A pallet shipment to be carried from `origin` to `destination`.
///
/// # Examples
///
/// ```
/// use pallet_routing::models::{Location, Shipment};
///
/// let s = Shipment::new(
///     "SHP001",
///     Location::new("Chicago", "IL"),
///     Location::new("Detroit", "MI"),
///     10,
/// );
/// assert_eq!(s.id, "SHP001");
/// assert_eq!(s.pallet_count, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub origin: Location,
    pub destination: Location,
    pub pallet_count: u32,
}

impl Shipment {
    /// Creates a shipment.
    pub fn new(
        id: impl Into<String>,
        origin: Location,
        destination: Location,
        pallet_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            origin,
            destination,
            pallet_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_key() {
        let l = Location::new("Dallas", "TX");
        assert_eq!(l.key(), "Dallas, TX");
        assert!(l.coordinates().is_none());
    }

    #[test]
    fn test_shipment_json_shape() {
        let s = Shipment::new(
            "SHP002",
            Location::new("Dallas", "TX"),
            Location::new("Houston", "TX"),
            15,
        );
        let json = serde_json::to_value(&s).expect("serializable");
        assert_eq!(json["id"], "SHP002");
        assert_eq!(json["pallet_count"], 15);
        assert_eq!(json["origin"]["city"], "Dallas");
        assert!(json["origin"].get("lat").is_none());

        let back: Shipment = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back, s);
    }
}
