//! Search configuration.

use serde::{Deserialize, Serialize};

/// Knobs for the search itself; fleet limits live in
/// [`FleetConfig`](crate::models::FleetConfig).
///
/// # Examples
///
/// ```
/// use pallet_routing::solver::SolverConfig;
///
/// let config = SolverConfig::default().with_seed(7).with_workers(4);
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.workers, 4);
/// assert!(config.max_passes.is_none());
///
/// let parsed = SolverConfig::from_json(r#"{"workers": 2}"#).unwrap();
/// assert_eq!(parsed.seed, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Base seed; worker `w` uses `seed + w`.
    pub seed: u64,
    /// Independent multi-start workers. `0` is treated as `1`.
    pub workers: usize,
    /// Optional cap on local search passes per worker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_passes: Option<usize>,
}

impl SolverConfig {
    pub const DEFAULT_SEED: u64 = 42;

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Seed of worker `w`.
    pub fn worker_seed(&self, worker: usize) -> u64 {
        self.seed.wrapping_add(worker as u64)
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            workers: 1,
            max_passes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.seed, 42);
        assert_eq!(c.workers, 1);
        assert_eq!(c.worker_seed(3), 45);
    }

    #[test]
    fn test_seed_wraps() {
        let c = SolverConfig::default().with_seed(u64::MAX);
        assert_eq!(c.worker_seed(1), 0);
    }

    #[test]
    fn test_json_roundtrip() {
        let c = SolverConfig::default().with_max_passes(5);
        let json = serde_json::to_string(&c).expect("serializable");
        assert_eq!(SolverConfig::from_json(&json).expect("parsable"), c);
    }
}
