//! Solve orchestration: build, construct, search, extract.
//!
//! [`Solver`] runs the whole pipeline for one fleet configuration. With more
//! than one worker it runs independent multi-starts on the rayon pool over a
//! shared read-only problem, each with its own seed, and keeps the best
//! result (fewest unassigned, then lowest cost, then lowest worker index).

mod config;
mod context;

pub use config::SolverConfig;
pub use context::{SolverContext, SolverPhase};
pub use crate::builder::validate;
pub use crate::local_search::SearchOutcome;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::builder::build;
use crate::constructive::{canonical_order, cheapest_insertion, EPSILON};
use crate::distance::DistanceProvider;
use crate::error::SolveError;
use crate::extraction::{extract, SolutionView};
use crate::local_search::{Deadline, LocalSearch};
use crate::models::{FleetConfig, ProblemModel, Shipment, Solution};

/// Result of [`Solver::run`] with search diagnostics.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solution: SolutionView,
    /// How the winning worker's search ended.
    pub outcome: SearchOutcome,
    /// Worker whose solution was kept.
    pub worker: usize,
    /// Phases the solve went through.
    pub phases: Vec<SolverPhase>,
}

/// Pallet routing solver.
///
/// # Examples
///
/// ```
/// use pallet_routing::distance::TravelCost;
/// use pallet_routing::models::{FleetConfig, Location, Shipment};
/// use pallet_routing::solver::{SearchOutcome, Solver, SolverConfig};
///
/// let shipments = vec![
///     Shipment::new("S1", Location::new("A", "XX"), Location::new("B", "XX"), 10),
///     Shipment::new("S2", Location::new("A", "XX"), Location::new("B", "XX"), 12),
/// ];
/// let provider = |x: &Location, y: &Location| {
///     Some(if x == y { TravelCost::default() } else { TravelCost::new(80.0, 60.0) })
/// };
/// let solver = Solver::new(FleetConfig::new(5, 800.0).with_time_limit(1.0))
///     .with_config(SolverConfig::default().with_seed(1));
///
/// let report = solver.run(&shipments, &provider).unwrap();
/// assert_eq!(report.outcome, SearchOutcome::Converged);
/// // both fit on one truck, loaded and unloaded at the same stops
/// assert_eq!(report.solution.routes.len(), 1);
/// assert_eq!(report.solution.total_distance, 80.0);
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    fleet: FleetConfig,
    config: SolverConfig,
}

impl Solver {
    pub fn new(fleet: FleetConfig) -> Self {
        Self {
            fleet,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn fleet(&self) -> &FleetConfig {
        &self.fleet
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves and returns only the output records.
    pub fn solve<P>(&self, shipments: &[Shipment], provider: &P) -> Result<SolutionView, SolveError>
    where
        P: DistanceProvider + ?Sized,
    {
        self.run(shipments, provider).map(|report| report.solution)
    }

    /// Solves and reports how the search went.
    ///
    /// # Errors
    ///
    /// [`SolveError::Validation`] if the input is invalid or the provider
    /// cannot price a needed leg. Unroutable shipments are not errors.
    pub fn run<P>(&self, shipments: &[Shipment], provider: &P) -> Result<SolveReport, SolveError>
    where
        P: DistanceProvider + ?Sized,
    {
        let mut ctx = SolverContext::new();
        info!(
            "solving {} shipments: {} vehicles x {} pallets, {} km max, {}s budget",
            shipments.len(),
            self.fleet.max_vehicles,
            self.fleet.vehicle_capacity,
            self.fleet.max_distance,
            self.fleet.time_limit_seconds
        );

        ctx.advance(SolverPhase::Building);
        // the budget covers building and construction too
        let deadline = Deadline::after_secs(self.fleet.time_limit_seconds);
        let problem = match build(shipments, &self.fleet, provider) {
            Ok(problem) => problem,
            Err(err) => {
                warn!("{err}");
                ctx.advance(SolverPhase::Failed);
                return Err(err);
            }
        };
        let workers = self.config.workers.max(1);

        ctx.advance(SolverPhase::Constructing);
        let initial: Vec<Solution> = (0..workers)
            .into_par_iter()
            .map(|w| cheapest_insertion(&problem, &self.construction_order(&problem, w)))
            .collect();

        ctx.advance(SolverPhase::Searching);
        let results: Vec<(Solution, SearchOutcome)> = initial
            .into_par_iter()
            .enumerate()
            .map(|(w, mut solution)| {
                let outcome = self.search(&problem, w, &mut solution, &deadline);
                (solution, outcome)
            })
            .collect();

        let (worker, solution, outcome) = select_best(results);
        ctx.advance(outcome.into());

        ctx.advance(SolverPhase::Extracting);
        let view = extract(&problem, &solution);
        ctx.advance(SolverPhase::Done);

        info!(
            "solved in {:?} ({outcome}, worker {worker}): {} routes, {:.1} km, cost {:.2}, {} unassigned",
            ctx.elapsed(),
            view.routes.len(),
            view.total_distance,
            view.total_cost,
            view.unassigned_shipments.len()
        );

        Ok(SolveReport {
            solution: view,
            outcome,
            worker,
            phases: ctx.history().to_vec(),
        })
    }

    /// Worker 0 uses the canonical order; the others shuffle it with their seed.
    fn construction_order(&self, problem: &ProblemModel, worker: usize) -> Vec<usize> {
        let mut order = canonical_order(problem);
        if worker > 0 {
            let mut rng = StdRng::seed_from_u64(self.config.worker_seed(worker));
            order.shuffle(&mut rng);
        }
        order
    }

    fn search(
        &self,
        problem: &ProblemModel,
        worker: usize,
        solution: &mut Solution,
        deadline: &Deadline,
    ) -> SearchOutcome {
        let mut search = LocalSearch::new(problem, self.config.worker_seed(worker));
        if let Some(max_passes) = self.config.max_passes {
            search = search.with_max_passes(max_passes);
        }
        search.improve(solution, deadline)
    }
}

/// Fewest unassigned, then lowest cost, then lowest worker index.
fn select_best(results: Vec<(Solution, SearchOutcome)>) -> (usize, Solution, SearchOutcome) {
    let mut best: Option<(usize, Solution, SearchOutcome)> = None;
    for (w, (solution, outcome)) in results.into_iter().enumerate() {
        let is_better = best.as_ref().is_none_or(|(_, b, _)| {
            solution.num_unassigned() < b.num_unassigned()
                || (solution.num_unassigned() == b.num_unassigned()
                    && solution.total_cost() < b.total_cost() - EPSILON)
        });
        if is_better {
            best = Some((w, solution, outcome));
        }
    }
    // at least one worker always runs
    best.unwrap_or_else(|| (0, Solution::new(), SearchOutcome::Converged))
}

/// Solves with the default [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use pallet_routing::distance::TravelCost;
/// use pallet_routing::models::{FleetConfig, Location, Shipment, UnassignedReason};
/// use pallet_routing::solver::solve;
///
/// let big = Shipment::new("BIG", Location::new("A", "XX"), Location::new("B", "XX"), 30);
/// let provider = |_: &Location, _: &Location| Some(TravelCost::new(10.0, 10.0));
///
/// let view = solve(&[big], &FleetConfig::default().with_time_limit(0.0), &provider).unwrap();
/// assert!(view.routes.is_empty());
/// assert_eq!(view.unassigned_shipments[0].reason, UnassignedReason::CapacityExceeded);
/// ```
pub fn solve<P>(
    shipments: &[Shipment],
    fleet: &FleetConfig,
    provider: &P,
) -> Result<SolutionView, SolveError>
where
    P: DistanceProvider + ?Sized,
{
    Solver::new(fleet.clone()).solve(shipments, provider)
}
