//! Agent (UAV) state
//!
//! An agent is one candidate solution: where it is, how far it moves per
//! iteration, and the best position it has occupied so far. Velocity is set
//! by the swarm's update rule; the agent only applies kinematics.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::vector::Vector;
use crate::{Error, Result};

/// One searcher in the swarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AgentState")]
pub struct Agent {
    position: Vector,
    velocity: Vector,
    personal_best: Vector,
}

/// Unchecked wire form of [`Agent`]
#[derive(Deserialize)]
struct AgentState {
    position: Vector,
    velocity: Vector,
    personal_best: Vector,
}

impl TryFrom<AgentState> for Agent {
    type Error = Error;

    fn try_from(state: AgentState) -> Result<Self> {
        state.position.ensure_same_dimension(&state.velocity)?;
        state.position.ensure_same_dimension(&state.personal_best)?;
        Ok(Self {
            position: state.position,
            velocity: state.velocity,
            personal_best: state.personal_best,
        })
    }
}

impl Agent {
    /// Random agent: position then velocity, each uniform in `[0, 1)^D`.
    pub fn initialize<R: Rng>(dimension: usize, rng: &mut R) -> Self {
        let position = Vector::random(dimension, rng);
        let velocity = Vector::random(dimension, rng);
        Self {
            personal_best: position.clone(),
            position,
            velocity,
        }
    }

    /// Agent at an explicit starting state. The personal best starts at `position`.
    pub fn from_parts(position: Vector, velocity: Vector) -> Result<Self> {
        position.ensure_same_dimension(&velocity)?;
        Ok(Self {
            personal_best: position.clone(),
            position,
            velocity,
        })
    }

    /// Current position
    pub fn position(&self) -> &Vector {
        &self.position
    }

    /// Displacement applied by the next [`advance_position`](Self::advance_position)
    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    /// Lowest-fitness position this agent has occupied
    pub fn personal_best(&self) -> &Vector {
        &self.personal_best
    }

    /// Dimension of the agent's vectors
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// `position += velocity`. Velocity is a per-iteration displacement, not a rate.
    pub fn advance_position(&mut self) {
        self.position.add_assign_unchecked(&self.velocity);
    }

    pub(crate) fn set_velocity(&mut self, velocity: Vector) {
        debug_assert_eq!(velocity.len(), self.dimension());
        self.velocity = velocity;
    }

    /// Snapshot the current position as the personal best.
    pub(crate) fn adopt_position_as_best(&mut self) {
        self.personal_best.clone_from(&self.position);
    }
}
