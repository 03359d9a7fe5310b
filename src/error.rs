//! Input errors that abort a solve before any search starts.

use std::fmt::{self, Display};

/// A malformed solve input.
///
/// Validation reports every problem it finds, so callers usually receive a
/// `Vec<ValidationError>` rather than a single value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A fleet limit that must be strictly positive is not.
    NonPositiveLimit { field: &'static str, value: f64 },
    /// The time budget is negative or not a number.
    InvalidTimeLimit { value: f64 },
    /// A cost coefficient is negative or not finite.
    InvalidCost { field: &'static str, value: f64 },
    /// A shipment carries no pallets, or more than a shipment may hold.
    PalletCountOutOfRange { shipment_id: String, pallet_count: u32 },
    /// More shipments than one solve accepts.
    TooManyShipments { count: usize, max: usize },
    /// A shipment has an empty identifier.
    EmptyShipmentId { index: usize },
    /// Two shipments share an identifier.
    DuplicateShipmentId { shipment_id: String },
    /// The distance provider does not know a leg.
    UnresolvedLocation { from: String, to: String },
    /// The distance provider returned a negative or non-finite cost.
    InvalidTravelCost { from: String, to: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::InvalidTimeLimit { value } => {
                write!(f, "time_limit_seconds must be a non-negative number, got {value}")
            }
            Self::InvalidCost { field, value } => {
                write!(f, "{field} must be a non-negative number, got {value}")
            }
            Self::PalletCountOutOfRange {
                shipment_id,
                pallet_count,
            } => write!(
                f,
                "Invalid pallet count for shipment {shipment_id}: {pallet_count}"
            ),
            Self::TooManyShipments { count, max } => {
                write!(f, "Too many shipments: {count} (maximum {max})")
            }
            Self::EmptyShipmentId { index } => {
                write!(f, "Shipment at position {index} has an empty id")
            }
            Self::DuplicateShipmentId { shipment_id } => {
                write!(f, "Duplicate shipment ID: {shipment_id}")
            }
            Self::UnresolvedLocation { from, to } => {
                write!(f, "No travel cost known from {from} to {to}")
            }
            Self::InvalidTravelCost { from, to } => {
                write!(f, "Travel cost from {from} to {to} is negative or not finite")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Why a solve was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The input failed validation; nothing was computed.
    Validation(Vec<ValidationError>),
}

impl SolveError {
    /// The validation errors behind this failure.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
        }
    }
}

impl Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => {
                write!(f, "input validation failed")?;
                for (i, e) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = ValidationError::NonPositiveLimit {
            field: "max_vehicles",
            value: 0.0,
        };
        assert_eq!(e.to_string(), "max_vehicles must be positive, got 0");

        let e = ValidationError::DuplicateShipmentId {
            shipment_id: "SHP001".into(),
        };
        assert_eq!(e.to_string(), "Duplicate shipment ID: SHP001");

        let e = ValidationError::TooManyShipments { count: 1200, max: 1000 };
        assert_eq!(e.to_string(), "Too many shipments: 1200 (maximum 1000)");
    }

    #[test]
    fn test_solve_error_joins_messages() {
        let err = SolveError::Validation(vec![
            ValidationError::InvalidTimeLimit { value: -1.0 },
            ValidationError::EmptyShipmentId { index: 2 },
        ]);
        assert_eq!(err.errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "input validation failed: time_limit_seconds must be a non-negative number, got -1; \
             Shipment at position 2 has an empty id"
        );
    }
}
