//! Fitness / sensing model
//!
//! Each UAV estimates its distance to the target through several sensor
//! channels (sound, visual, heat by default). The fitness of a position is the
//! weighted sum of the channel estimates; lower is better, and it is zero
//! exactly at the target when all weights are positive.
//!
//! Channels are pluggable through [`SensorChannel`]. The only channel shipped
//! is [`EuclideanChannel`], so the three default channels currently agree and
//! only their weights differ.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vector::Vector;
use crate::{Error, Result};

/// Sound sensors: strongest evidence that the target is close by.
pub const SOUND: &str = "sound";
/// Visual sensors: weakest, a trail may be cold.
pub const VISUAL: &str = "visual";
/// Heat sensors: middling, heat signatures are not unique to the target.
pub const HEAT: &str = "heat";

/// A single distance-estimating sensor channel
pub trait SensorChannel: Send + Sync {
    /// Channel name, matched against [`SensorWeights`] keys
    fn name(&self) -> &str;

    /// Estimated distance from `position` to `target`, non-negative
    fn distance(&self, position: &Vector, target: &Vector) -> Result<f64>;
}

/// Channel reporting the exact Euclidean distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EuclideanChannel {
    name: String,
}

impl EuclideanChannel {
    /// Create a named Euclidean channel
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SensorChannel for EuclideanChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn distance(&self, position: &Vector, target: &Vector) -> Result<f64> {
        position.distance(target)
    }
}

/// Sensor name → weight table (deterministic ordering via BTreeMap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorWeights(BTreeMap<String, f64>);

impl Default for SensorWeights {
    fn default() -> Self {
        Self::empty()
            .with(SOUND, 0.5)
            .with(VISUAL, 0.3)
            .with(HEAT, 0.4)
    }
}

impl SensorWeights {
    /// Table with no channels
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Set a channel weight, replacing any previous value
    pub fn with(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.insert(name, weight);
        self
    }

    /// Set a channel weight, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, weight: f64) -> Option<f64> {
        self.0.insert(name.into(), weight)
    }

    /// Weight of a channel
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Iterate `(name, weight)` in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(name, w)| (name.as_str(), *w))
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no channel is configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Reject empty tables and negative, non-finite or all-zero weights.
    pub fn validate(&self) -> Result<()> {
        validate_weights(self.iter())
    }
}

fn validate_weights<'a>(weights: impl Iterator<Item = (&'a str, f64)>) -> Result<()> {
    let mut total = 0.0;
    let mut count = 0usize;
    for (name, w) in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(Error::invalid(format!(
                "sensor weight `{name}` must be finite and non-negative, got {w}"
            )));
        }
        total += w;
        count += 1;
    }
    if count == 0 {
        return Err(Error::invalid("sensor weights must name at least one channel"));
    }
    if total <= 0.0 {
        return Err(Error::invalid("sensor weights must not all be zero"));
    }
    Ok(())
}

/// Weighted Euclidean estimate over every channel in `weights`.
///
/// Produces the same value as `SensingModel::from_weights(weights)?.estimate(..)`.
pub fn estimate(position: &Vector, target: &Vector, weights: &SensorWeights) -> Result<f64> {
    let distance = position.distance(target)?;
    Ok(weights.iter().fold(0.0, |total, (_, w)| total + w * distance))
}

struct WeightedChannel {
    channel: Box<dyn SensorChannel>,
    weight: f64,
}

/// A set of named channels combined by weighted sum
#[derive(Default)]
pub struct SensingModel {
    channels: Vec<WeightedChannel>,
}

impl fmt::Debug for SensingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.channels.iter().map(|c| (c.channel.name(), c.weight)))
            .finish()
    }
}

impl SensingModel {
    /// Model with no channels
    pub fn new() -> Self {
        Self::default()
    }

    /// One [`EuclideanChannel`] per weight entry, in name order.
    pub fn from_weights(weights: &SensorWeights) -> Result<Self> {
        weights.validate()?;
        Ok(weights
            .iter()
            .fold(Self::new(), |model, (name, w)| {
                model.with_channel(EuclideanChannel::new(name), w)
            }))
    }

    /// Add a channel with its weight
    pub fn with_channel(mut self, channel: impl SensorChannel + 'static, weight: f64) -> Self {
        self.channels.push(WeightedChannel {
            channel: Box::new(channel),
            weight,
        });
        self
    }

    /// Channel names in evaluation order
    pub fn channel_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.channels.iter().map(|c| c.channel.name())
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if no channel is configured
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channel name → weight table of this model. Repeated names accumulate.
    pub fn weights(&self) -> SensorWeights {
        let mut table = SensorWeights::empty();
        for c in &self.channels {
            let prior = table.get(c.channel.name()).unwrap_or(0.0);
            table.insert(c.channel.name(), prior + c.weight);
        }
        table
    }

    /// Same rules as [`SensorWeights::validate`], applied to the channel weights.
    pub fn validate(&self) -> Result<()> {
        validate_weights(self.channels.iter().map(|c| (c.channel.name(), c.weight)))
    }

    /// Weighted sum of channel distance estimates
    pub fn estimate(&self, position: &Vector, target: &Vector) -> Result<f64> {
        position.ensure_same_dimension(target)?;
        let mut total = 0.0;
        for c in &self.channels {
            total += c.weight * c.channel.distance(position, target)?;
        }
        Ok(total)
    }
}
