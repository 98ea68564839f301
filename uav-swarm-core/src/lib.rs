//! # UAV Swarm Core
//!
//! Particle Swarm Optimization search for a stationary target.
//!
//! A population of agents ("UAVs") explores a continuous `D`-dimensional space
//! and converges on the position that minimizes a weighted multi-sensor
//! distance estimate. This crate provides:
//! - [`Vector`](vector::Vector): fixed-length real vectors with elementwise arithmetic
//! - [`Agent`](agent::Agent): one candidate solution and its personal best
//! - [`SensingModel`](sensing::SensingModel): pluggable weighted multi-channel fitness
//! - [`Swarm`](swarm::Swarm): the coordinator driving the iteration loop
//! - [`SearchObserver`](observe::SearchObserver): per-iteration notification seam
//!
//! ## Example
//!
//! ```rust
//! use uav_swarm_core::prelude::*;
//!
//! let config = SwarmConfig::builder()
//!     .population_size(10)
//!     .dimension(2)
//!     .n_iterations(50)
//!     .seed(7)
//!     .build()?;
//!
//! let outcome = Swarm::new(config)?.run()?;
//! assert_eq!(outcome.best_position.len(), 2);
//! # Ok::<(), uav_swarm_core::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod observe;
pub mod outcome;
pub mod rng;
pub mod sensing;
pub mod swarm;
pub mod vector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::agent::Agent;
    pub use crate::config::{SwarmConfig, SwarmConfigBuilder};
    pub use crate::observe::{IterationReport, NoopObserver, SearchObserver};
    pub use crate::outcome::SearchOutcome;
    pub use crate::sensing::{
        estimate, EuclideanChannel, SensingModel, SensorChannel, SensorWeights,
    };
    pub use crate::swarm::{SearchPhase, Swarm};
    pub use crate::vector::Vector;
    pub use crate::Error;
}

/// Result type for swarm search operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for swarm search operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Configuration rejected at construction
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Which parameter was rejected and why
        reason: String,
    },
    /// Two vectors that must share a dimension do not
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension required by the receiving side
        expected: usize,
        /// Dimension actually supplied
        actual: usize,
    },
    /// Compact binary encoding or decoding failed
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl From<postcard::Error> for Error {
    fn from(err: postcard::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
