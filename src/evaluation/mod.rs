//! Route feasibility checking.
//!
//! [`FeasibilityChecker`] is the single source of truth for route validity;
//! construction and local search call it before accepting any change.

mod feasibility;

pub use feasibility::{FeasibilityChecker, Violation, ViolationKind};
