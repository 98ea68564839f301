//! # UAV Swarm
//!
//! **Particle swarm search for a stationary target, driven by weighted multi-sensor estimates.**
//!
//! A fleet of UAVs starts at random positions in `[0, 1)^D` and converges on the
//! point that minimizes a weighted sum of sound, visual and heat distance
//! estimates. The search itself lives in [`uav_swarm_core`]; this crate adds the
//! caller-side pieces: a console report and the `uav_search` binary.
//!
//! ## Quick Start
//!
//! ```rust
//! use uav_swarm::prelude::*;
//!
//! let config = SwarmConfig::builder()
//!     .population_size(10)
//!     .dimension(2)
//!     .n_iterations(100)
//!     .seed(1)
//!     .build()?;
//!
//! let outcome = Swarm::new(config)?.run()?;
//! println!("{}", uav_swarm::report::render_text(&outcome, 4));
//! # Ok::<(), uav_swarm::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Build the `uav_search` command-line front end
//!
//! ## Crate Structure
//!
//! - [`uav_swarm_core`]: Agents, sensing model and swarm coordinator
//! - [`report`]: Human-readable rendering of a finished search

#![forbid(unsafe_code)]

// Re-export the core crate
pub use uav_swarm_core as core;

// Re-export commonly used items at the top level
pub use uav_swarm_core::{
    config::SwarmConfig,
    outcome::SearchOutcome,
    sensing::{SensingModel, SensorWeights},
    swarm::Swarm,
    vector::Vector,
    Error, Result,
};

pub mod report;

/// Prelude module for convenient imports
///
/// ```rust
/// use uav_swarm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::report::render_text;
}
