use crate::{Error, Result};
use alloc::{format, vec::Vec};
use rand::{seq::SliceRandom, Rng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two disjoint partitions of a dataset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Split<T> {
    pub training: Vec<T>,
    pub testing: Vec<T>,
}

/// Shuffles `0..len` and cuts the permutation at `floor(len * train_ratio)`.
///
/// `len` must be non-zero and `train_ratio` must lie in `(0, 1]`. Feeding the same seeded
/// `rng` reproduces the same permutation.
pub fn split_indices<R>(len: usize, train_ratio: f64, rng: &mut R) -> Result<Split<usize>>
where
    R: Rng + ?Sized,
{
    if len == 0 {
        return Err(Error::invalid("dataset", "cannot split an empty dataset"));
    }
    if !(train_ratio > 0.0 && train_ratio <= 1.0) {
        return Err(Error::invalid(
            "train_ratio",
            format!("{} is not in (0, 1]", train_ratio),
        ));
    }
    let train_len = ((len as f64) * train_ratio) as usize;

    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    let testing = indices.split_off(train_len.min(len));

    tracing::debug!(
        total = len,
        training = indices.len(),
        testing = testing.len(),
        "split dataset"
    );
    Ok(Split {
        training: indices,
        testing,
    })
}

/// Partitions `dataset` into a training and a testing set.
///
/// See [`split_indices`] for the permutation. No element appears in both outputs and every
/// element appears in one of them. A ratio that leaves no testing rows yields an empty
/// testing set.
pub fn split<T, R>(dataset: &[T], train_ratio: f64, rng: &mut R) -> Result<Split<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let Split { training, testing } = split_indices(dataset.len(), train_ratio, rng)?;
    Ok(Split {
        training: training.into_iter().map(|i| dataset[i].clone()).collect(),
        testing: testing.into_iter().map(|i| dataset[i].clone()).collect(),
    })
}
