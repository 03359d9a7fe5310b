//! Route feasibility: capacity, LIFO nesting and route limits in one walk.

use std::collections::HashSet;
use std::fmt;

use crate::models::{NodeKind, ProblemModel, RouteMetrics, Vehicle};

const LIMIT_TOLERANCE: f64 = 1e-9;

/// The constraint a candidate route breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    Capacity,
    Lifo,
    Distance,
    Duration,
}

/// A constraint violation found by [`FeasibilityChecker::check`].
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Load after the stop at `position` exceeds capacity.
    Capacity {
        position: usize,
        load: u32,
        capacity: u32,
    },
    /// The stop at `position` breaks stack order: a delivery that is not on
    /// top of the load, a shipment picked up twice, or (at `position == len`)
    /// a shipment still aboard at the end.
    Lifo { position: usize, shipment: usize },
    /// Route distance exceeds the vehicle's maximum.
    Distance { distance: f64, max_distance: f64 },
    /// Route duration exceeds the vehicle's maximum.
    Duration { duration: f64, max_duration: f64 },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::Capacity { .. } => ViolationKind::Capacity,
            Self::Lifo { .. } => ViolationKind::Lifo,
            Self::Distance { .. } => ViolationKind::Distance,
            Self::Duration { .. } => ViolationKind::Duration,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity {
                position,
                load,
                capacity,
            } => write!(f, "load {load} exceeds capacity {capacity} at stop {position}"),
            Self::Lifo { position, shipment } => {
                write!(f, "shipment {shipment} breaks LIFO order at stop {position}")
            }
            Self::Distance {
                distance,
                max_distance,
            } => write!(f, "distance {distance:.1} exceeds maximum {max_distance:.1}"),
            Self::Duration {
                duration,
                max_duration,
            } => write!(f, "duration {duration:.1} exceeds maximum {max_duration:.1}"),
        }
    }
}

/// Pure validity predicate for node sequences driven by one vehicle.
///
/// Walks the sequence once keeping a stack of shipments aboard. A pickup
/// pushes; a delivery must remove the shipment on top. That single rule
/// rejects every partial overlap of two shipments' pickup/delivery spans as
/// well as deliveries before their pickup. Each node is expected at most once.
///
/// # Examples
///
/// ```
/// use pallet_routing::builder::build;
/// use pallet_routing::distance::TravelCost;
/// use pallet_routing::evaluation::{FeasibilityChecker, ViolationKind};
/// use pallet_routing::models::{FleetConfig, Location, Shipment};
///
/// let shipments = vec![
///     Shipment::new("S1", Location::new("A", "XX"), Location::new("B", "XX"), 10),
///     Shipment::new("S2", Location::new("C", "XX"), Location::new("D", "XX"), 10),
/// ];
/// let provider = |_: &Location, _: &Location| Some(TravelCost::new(10.0, 10.0));
/// let problem = build(&shipments, &FleetConfig::default(), &provider).unwrap();
/// let vehicle = problem.vehicle(0);
/// let checker = FeasibilityChecker::new(&problem, &vehicle);
///
/// // nested: S1 loaded first, S2 on top, S2 off first
/// assert!(checker.is_feasible(&[0, 2, 3, 1]));
/// // partial overlap: S1 would have to come out from under S2
/// let err = checker.check(&[0, 2, 1, 3]).unwrap_err();
/// assert_eq!(err.kind(), ViolationKind::Lifo);
/// ```
pub struct FeasibilityChecker<'a> {
    problem: &'a ProblemModel,
    vehicle: &'a Vehicle,
}

impl<'a> FeasibilityChecker<'a> {
    /// Creates a checker for routes driven by `vehicle`.
    pub fn new(problem: &'a ProblemModel, vehicle: &'a Vehicle) -> Self {
        Self { problem, vehicle }
    }

    pub fn problem(&self) -> &'a ProblemModel {
        self.problem
    }

    pub fn vehicle(&self) -> &'a Vehicle {
        self.vehicle
    }

    /// Checks a node sequence, returning its metrics when feasible.
    pub fn check(&self, sequence: &[usize]) -> Result<RouteMetrics, Violation> {
        let costs = self.problem.costs();
        let capacity = self.vehicle.capacity();
        let max_distance = self.vehicle.max_distance();

        let mut aboard: Vec<usize> = Vec::new();
        let mut picked: HashSet<usize> = HashSet::with_capacity(sequence.len() / 2);
        let mut load: u32 = 0;
        let mut metrics = RouteMetrics::default();
        let mut prev: Option<usize> = None;

        for (position, &n) in sequence.iter().enumerate() {
            let node = self.problem.node(n);
            match node.kind {
                NodeKind::Pickup => {
                    if !picked.insert(node.shipment) {
                        return Err(Violation::Lifo {
                            position,
                            shipment: node.shipment,
                        });
                    }
                    aboard.push(node.shipment);
                    load += self.problem.pallets(node.shipment);
                    if load > capacity {
                        return Err(Violation::Capacity {
                            position,
                            load,
                            capacity,
                        });
                    }
                    metrics.peak_load = metrics.peak_load.max(load);
                }
                NodeKind::Delivery => {
                    if aboard.last() != Some(&node.shipment) {
                        return Err(Violation::Lifo {
                            position,
                            shipment: node.shipment,
                        });
                    }
                    aboard.pop();
                    load -= self.problem.pallets(node.shipment);
                }
            }

            if let Some(p) = prev {
                metrics.distance += costs.distance(p, n);
                metrics.duration += costs.duration(p, n);
                // legs are non-negative, so the distance only grows from here
                if metrics.distance > max_distance + LIMIT_TOLERANCE {
                    return Err(Violation::Distance {
                        distance: metrics.distance,
                        max_distance,
                    });
                }
            }
            prev = Some(n);
        }

        if let Some(&shipment) = aboard.last() {
            return Err(Violation::Lifo {
                position: sequence.len(),
                shipment,
            });
        }

        if let Some(max_duration) = self.vehicle.max_duration() {
            if metrics.duration > max_duration + LIMIT_TOLERANCE {
                return Err(Violation::Duration {
                    duration: metrics.duration,
                    max_duration,
                });
            }
        }

        Ok(metrics)
    }

    /// Returns `true` if the sequence satisfies every route constraint.
    pub fn is_feasible(&self, sequence: &[usize]) -> bool {
        self.check(sequence).is_ok()
    }
}
