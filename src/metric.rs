use crate::{Error, Result};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Computes the Euclidean distance `sqrt(sum((a[i] - b[i])^2))` between two vectors.
///
/// Fails with [`Error::DimensionMismatch`] if the vectors differ in length.
/// Two empty vectors are zero-dimensional and have distance `0`.
pub fn euclidean<T: Float>(a: &[T], b: &[T]) -> Result<T> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let sum = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            let delta = x - y;
            delta * delta
        })
        .fold(T::zero(), |acc, sq| acc + sq);
    Ok(sum.sqrt())
}

/// A dissimilarity between two feature vectors of equal dimensionality.
///
/// Implementations must return a non-negative value and must fail with
/// [`Error::DimensionMismatch`] rather than compare vectors of unequal length.
pub trait Metric {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64>;
}

impl<M> Metric for &M
where
    M: Metric + ?Sized,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        (**self).distance(a, b)
    }
}

/// The Euclidean (L2) metric.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        euclidean(a, b)
    }
}
