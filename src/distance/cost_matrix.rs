//! Dense node-to-node travel cost matrix.

use super::TravelCost;

/// A dense n×n distance/duration matrix stored in row-major order.
///
/// Built once per solve from a [`DistanceProvider`](super::DistanceProvider)
/// and read by every later stage.
///
/// # Examples
///
/// ```
/// use pallet_routing::distance::{CostMatrix, TravelCost};
///
/// let mut m = CostMatrix::new(2);
/// m.set(0, 1, TravelCost::new(380.0, 240.0));
/// assert_eq!(m.distance(0, 1), 380.0);
/// assert_eq!(m.duration(0, 1), 240.0);
/// assert_eq!(m.distance(1, 0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CostMatrix {
    distance: Vec<f64>,
    duration: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            distance: vec![0.0; size * size],
            duration: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from explicit n×n distance and duration grids.
    ///
    /// Returns `None` if either grid's length doesn't match `size * size`.
    pub fn from_data(size: usize, distance: Vec<f64>, duration: Vec<f64>) -> Option<Self> {
        if distance.len() != size * size || duration.len() != size * size {
            return None;
        }
        Some(Self {
            distance,
            duration,
            size,
        })
    }

    /// Distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance[from * self.size + to]
    }

    /// Duration from node `from` to node `to`.
    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.duration[from * self.size + to]
    }

    /// Both components of the leg `from → to`.
    pub fn get(&self, from: usize, to: usize) -> TravelCost {
        TravelCost::new(self.distance(from, to), self.duration(from, to))
    }

    /// Sets the cost of the leg `from → to`.
    pub fn set(&mut self, from: usize, to: usize, cost: TravelCost) {
        let idx = from * self.size + to;
        self.distance[idx] = cost.distance_km;
        self.duration[idx] = cost.duration_min;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total distance of visiting `sequence` in order (no return leg).
    pub fn path_distance(&self, sequence: &[usize]) -> f64 {
        sequence
            .windows(2)
            .map(|leg| self.distance(leg[0], leg[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> CostMatrix {
        // nodes at 0, 1, 3 on a line, 1 km = 1 min
        let pos = [0.0f64, 1.0, 3.0];
        let mut m = CostMatrix::new(3);
        for (i, a) in pos.iter().enumerate() {
            for (j, b) in pos.iter().enumerate() {
                let d = (a - b).abs();
                m.set(i, j, TravelCost::new(d, d));
            }
        }
        m
    }

    #[test]
    fn test_from_data() {
        let m = CostMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0], vec![0.0, 7.0, 7.0, 0.0])
            .expect("valid");
        assert_eq!(m.distance(0, 1), 5.0);
        assert_eq!(m.duration(1, 0), 7.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(CostMatrix::from_data(2, vec![0.0, 1.0, 2.0], vec![0.0; 4]).is_none());
        assert!(CostMatrix::from_data(2, vec![0.0; 4], vec![0.0]).is_none());
    }

    #[test]
    fn test_path_distance() {
        let m = line();
        assert_eq!(m.path_distance(&[]), 0.0);
        assert_eq!(m.path_distance(&[2]), 0.0);
        assert!((m.path_distance(&[0, 2, 1]) - 5.0).abs() < 1e-10);
    }
}
