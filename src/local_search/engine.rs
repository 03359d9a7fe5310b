//! Time-budgeted improvement loop over the move operators.
//!
//! # Algorithm
//!
//! Each pass first tries to place shipments left unassigned, then runs
//! [`relocate`], [`swap`] and [`reversal`] in turn, each repeated until it
//! stops finding an improving move. Scan orders are shuffled per operator
//! call from a seeded generator, so runs with the same seed are identical.
//! The loop ends when a full pass changes nothing, the deadline passes, or
//! the pass limit is reached.
//!
//! Solutions compare lexicographically: fewer unassigned shipments first,
//! then lower total cost. Every accepted move keeps all routes feasible.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use super::{relocate, reversal, swap};
use crate::constructive::{apply_placement, cheapest_placement};
use crate::models::{ProblemModel, Solution, UnassignedReason};

/// Wall-clock cutoff for the search.
///
/// # Examples
///
/// ```
/// use pallet_routing::local_search::Deadline;
///
/// assert!(Deadline::after_secs(0.0).expired());
/// assert!(!Deadline::after_secs(60.0).expired());
/// assert!(!Deadline::never().expired());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline `budget` from now. Budgets too large to represent never expire.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }

    /// A deadline `seconds` from now; infinite budgets never expire.
    pub fn after_secs(seconds: f64) -> Self {
        match Duration::try_from_secs_f64(seconds) {
            Ok(budget) => Self::after(budget),
            Err(_) if seconds.is_sign_negative() => Self::expired_now(),
            Err(_) => Self::never(),
        }
    }

    pub fn never() -> Self {
        Self { at: None }
    }

    pub fn expired_now() -> Self {
        Self {
            at: Some(Instant::now()),
        }
    }

    /// Returns `true` once the cutoff has passed.
    pub fn expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Why the improvement loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A full pass found no improving move.
    Converged,
    /// The time budget ran out first.
    TimeLimitReached,
    /// The configured number of passes was used up.
    PassLimitReached,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Converged => "converged",
            Self::TimeLimitReached => "time limit reached",
            Self::PassLimitReached => "pass limit reached",
        })
    }
}

type Operator = fn(&ProblemModel, &mut Solution, &[usize], &Deadline) -> bool;

const OPERATORS: [(&str, Operator); 3] = [
    ("relocate", relocate),
    ("swap", swap),
    ("reversal", reversal),
];

/// Seeded first-improvement local search.
///
/// # Examples
///
/// ```
/// use pallet_routing::builder::build;
/// use pallet_routing::constructive::{canonical_order, cheapest_insertion};
/// use pallet_routing::distance::TravelCost;
/// use pallet_routing::local_search::{Deadline, LocalSearch, SearchOutcome};
/// use pallet_routing::models::{FleetConfig, Location, Shipment};
///
/// let a = Location::new("A", "XX");
/// let b = Location::new("B", "XX");
/// let shipments = vec![Shipment::new("S1", a.clone(), b.clone(), 10)];
/// let provider = |x: &Location, y: &Location| {
///     Some(if x == y { TravelCost::default() } else { TravelCost::new(50.0, 45.0) })
/// };
/// let problem = build(&shipments, &FleetConfig::default(), &provider).unwrap();
///
/// let mut solution = cheapest_insertion(&problem, &canonical_order(&problem));
/// let outcome = LocalSearch::new(&problem, 42).improve(&mut solution, &Deadline::never());
/// assert_eq!(outcome, SearchOutcome::Converged);
/// assert_eq!(solution.total_distance(), 50.0);
/// ```
pub struct LocalSearch<'a> {
    problem: &'a ProblemModel,
    rng: StdRng,
    max_passes: Option<usize>,
}

impl<'a> LocalSearch<'a> {
    pub fn new(problem: &'a ProblemModel, seed: u64) -> Self {
        Self {
            problem,
            rng: StdRng::seed_from_u64(seed),
            max_passes: None,
        }
    }

    /// Caps the number of improvement passes.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Improves `solution` in place until convergence or a limit.
    pub fn improve(&mut self, solution: &mut Solution, deadline: &Deadline) -> SearchOutcome {
        let mut shipments: Vec<usize> = (0..self.problem.num_shipments()).collect();
        let mut passes = 0;

        loop {
            if deadline.expired() {
                return SearchOutcome::TimeLimitReached;
            }
            if self.max_passes.is_some_and(|max| passes >= max) {
                return SearchOutcome::PassLimitReached;
            }
            passes += 1;

            let mut improved = self.reinsert_unassigned(solution, deadline);

            for (name, operator) in OPERATORS {
                loop {
                    shipments.shuffle(&mut self.rng);
                    if !operator(self.problem, solution, &shipments, deadline) {
                        break;
                    }
                    improved = true;
                    trace!("{name}: cost {:.3}", solution.total_cost());
                    if deadline.expired() {
                        return SearchOutcome::TimeLimitReached;
                    }
                }
            }

            debug!(
                "pass {passes}: {} routes, cost {:.3}, {} unassigned",
                solution.num_routes(),
                solution.total_cost(),
                solution.num_unassigned()
            );
            if !improved {
                return SearchOutcome::Converged;
            }
        }
    }

    /// Tries to place every shipment the search could not route yet.
    fn reinsert_unassigned(&mut self, solution: &mut Solution, deadline: &Deadline) -> bool {
        let mut pending = solution.take_unassigned();
        pending.shuffle(&mut self.rng);
        let mut placed = false;

        for u in pending {
            if u.reason == UnassignedReason::NoFeasibleRoute && !deadline.expired() {
                if let Some(placement) = cheapest_placement(self.problem, solution, u.shipment) {
                    apply_placement(self.problem, solution, u.shipment, &placement);
                    placed = true;
                    continue;
                }
            }
            solution.add_unassigned(u);
        }
        placed
    }
}
