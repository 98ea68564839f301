//! Fixed-length real vectors
//!
//! Positions, velocities, targets and best positions all share this type.
//! Arithmetic is elementwise or norm-based; no coordinate is special.

use core::fmt;
use core::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An ordered, fixed-length sequence of reals
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(Vec<f64>);

impl Vector {
    /// Zero vector of the given dimension
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    /// Draw each coordinate independently and uniformly from `[0, 1)`
    pub fn random<R: Rng>(dimension: usize, rng: &mut R) -> Self {
        Self((0..dimension).map(|_| rng.gen::<f64>()).collect())
    }

    /// Dimension of the vector
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-dimensional vector
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Coordinates as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterate over coordinates
    pub fn iter(&self) -> core::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Consume into the underlying coordinates
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Fail with [`Error::DimensionMismatch`] unless `other` has our dimension
    pub fn ensure_same_dimension(&self, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }

    /// Euclidean distance `‖self - other‖₂`
    pub fn distance(&self, other: &Vector) -> Result<f64> {
        self.ensure_same_dimension(other)?;
        let sum_sq: f64 = self
            .0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Ok(sum_sq.sqrt())
    }

    /// `self += other`, elementwise. Caller guarantees equal dimensions.
    pub(crate) fn add_assign_unchecked(&mut self, other: &Vector) {
        debug_assert_eq!(self.len(), other.len());
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a += b;
        }
    }

    /// True if every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(coords: Vec<f64>) -> Self {
        Self(coords)
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(coords: [f64; N]) -> Self {
        Self(coords.to_vec())
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[f64]> for Vector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = core::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match f.precision() {
                Some(p) => write!(f, "{x:.p$}")?,
                None => write!(f, "{x}")?,
            }
        }
        f.write_str("]")
    }
}
