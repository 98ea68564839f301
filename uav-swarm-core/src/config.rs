//! Swarm configuration
//!
//! All parameters of a run are fixed here and validated once, at swarm
//! construction. Missing fields in a deserialized config fall back to the
//! defaults of the reference demo run (10 UAVs in the plane, 100 iterations).

use serde::{Deserialize, Serialize};

use crate::sensing::SensorWeights;
use crate::{Error, Result};

/// Inertia weight applied to the previous velocity.
pub const DEFAULT_INERTIA: f64 = 0.5;
/// Cognitive weight pulling an agent toward its personal best.
pub const DEFAULT_COGNITIVE: f64 = 1.5;
/// Social weight pulling an agent toward the swarm's global best.
pub const DEFAULT_SOCIAL: f64 = 1.5;

/// Particle swarm search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Number of UAVs in the swarm
    pub population_size: usize,
    /// Dimension of the search space
    pub dimension: usize,
    /// Number of full update passes; the run never stops early
    pub n_iterations: usize,
    /// Inertia weight (momentum)
    pub inertia: f64,
    /// Cognitive coefficient (attraction to personal best)
    pub cognitive: f64,
    /// Social coefficient (attraction to global best)
    pub social: f64,
    /// Per-sensor weights of the fitness estimate
    pub weights: SensorWeights,
    /// Seed for the random source; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            dimension: 2,
            n_iterations: 100,
            inertia: DEFAULT_INERTIA,
            cognitive: DEFAULT_COGNITIVE,
            social: DEFAULT_SOCIAL,
            weights: SensorWeights::default(),
            seed: None,
        }
    }
}

impl SwarmConfig {
    /// Create a new builder starting from the defaults
    pub fn builder() -> SwarmConfigBuilder {
        SwarmConfigBuilder::new()
    }

    /// Fail fast on configurations that would yield an empty or degenerate run.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::invalid("population_size must be positive"));
        }
        if self.dimension == 0 {
            return Err(Error::invalid("dimension must be positive"));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid(format!(
                    "{name} coefficient must be finite, got {value}"
                )));
            }
        }
        self.weights.validate()
    }
}

/// Builder for SwarmConfig
#[derive(Debug, Default)]
pub struct SwarmConfigBuilder {
    config: SwarmConfig,
}

impl SwarmConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of UAVs
    pub fn population_size(mut self, population_size: usize) -> Self {
        self.config.population_size = population_size;
        self
    }

    /// Set the search-space dimension
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.config.dimension = dimension;
        self
    }

    /// Set the iteration budget
    pub fn n_iterations(mut self, n_iterations: usize) -> Self {
        self.config.n_iterations = n_iterations;
        self
    }

    /// Set the inertia weight
    pub fn inertia(mut self, inertia: f64) -> Self {
        self.config.inertia = inertia;
        self
    }

    /// Set the cognitive weight
    pub fn cognitive(mut self, cognitive: f64) -> Self {
        self.config.cognitive = cognitive;
        self
    }

    /// Set the social weight
    pub fn social(mut self, social: f64) -> Self {
        self.config.social = social;
        self
    }

    /// Replace the sensor weight table
    pub fn weights(mut self, weights: SensorWeights) -> Self {
        self.config.weights = weights;
        self
    }

    /// Seed the random source for a reproducible run
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<SwarmConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
