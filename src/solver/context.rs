//! Solve lifecycle tracking.

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;
use serde::Serialize;

use crate::local_search::SearchOutcome;

/// Stage of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverPhase {
    Initialized,
    Building,
    Constructing,
    Searching,
    Converged,
    TimeLimitReached,
    PassLimitReached,
    Extracting,
    Done,
    /// Input validation failed; terminal.
    Failed,
}

impl SolverPhase {
    /// Whether `next` may follow `self`.
    pub fn allows(self, next: SolverPhase) -> bool {
        use SolverPhase::*;
        matches!(
            (self, next),
            (Initialized, Building)
                | (Building, Constructing)
                | (Building, Failed)
                | (Constructing, Searching)
                | (Searching, Converged | TimeLimitReached | PassLimitReached)
                | (Converged | TimeLimitReached | PassLimitReached, Extracting)
                | (Extracting, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SolverPhase::Done | SolverPhase::Failed)
    }
}

impl From<SearchOutcome> for SolverPhase {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Converged => SolverPhase::Converged,
            SearchOutcome::TimeLimitReached => SolverPhase::TimeLimitReached,
            SearchOutcome::PassLimitReached => SolverPhase::PassLimitReached,
        }
    }
}

impl fmt::Display for SolverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverPhase::Initialized => "initialized",
            SolverPhase::Building => "building",
            SolverPhase::Constructing => "constructing",
            SolverPhase::Searching => "searching",
            SolverPhase::Converged => "converged",
            SolverPhase::TimeLimitReached => "time limit reached",
            SolverPhase::PassLimitReached => "pass limit reached",
            SolverPhase::Extracting => "extracting",
            SolverPhase::Done => "done",
            SolverPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Phase history and wall clock of one solve.
///
/// # Examples
///
/// ```
/// use pallet_routing::solver::{SolverContext, SolverPhase};
///
/// let mut ctx = SolverContext::new();
/// ctx.advance(SolverPhase::Building);
/// ctx.advance(SolverPhase::Failed);
/// assert_eq!(ctx.phase(), SolverPhase::Failed);
/// assert_eq!(ctx.history().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SolverContext {
    history: Vec<SolverPhase>,
    started: Instant,
}

impl SolverContext {
    pub fn new() -> Self {
        Self {
            history: vec![SolverPhase::Initialized],
            started: Instant::now(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SolverPhase {
        self.history
            .last()
            .copied()
            .unwrap_or(SolverPhase::Initialized)
    }

    /// Every phase entered so far, oldest first.
    pub fn history(&self) -> &[SolverPhase] {
        &self.history
    }

    /// Moves to `next`.
    pub fn advance(&mut self, next: SolverPhase) {
        let current = self.phase();
        debug_assert!(current.allows(next), "{current} -> {next}");
        debug!("solver: {current} -> {next} after {:?}", self.elapsed());
        self.history.push(next);
    }

    /// Time since the context was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for SolverContext {
    fn default() -> Self {
        Self::new()
    }
}
