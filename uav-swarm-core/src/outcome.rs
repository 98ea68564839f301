//! Result of a completed search.

use serde::{Deserialize, Serialize};

use crate::vector::Vector;
use crate::Result;

/// Best position found, its fitness, and the target that was searched for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Global best position at the end of the run
    pub best_position: Vector,
    /// Sensing estimate at `best_position` ("total sensor data")
    pub best_fitness: f64,
    /// The stationary target
    pub target: Vector,
}

impl SearchOutcome {
    /// Dimension shared by every vector in the outcome
    pub fn dimension(&self) -> usize {
        self.best_position.len()
    }

    /// Exact Euclidean miss distance between the best position and the target
    pub fn miss_distance(&self) -> Result<f64> {
        self.best_position.distance(&self.target)
    }

    /// Compact binary encoding, sized for a radio downlink frame
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Decode from [`to_bytes`](Self::to_bytes) output
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }
}
