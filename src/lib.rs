//! Exact k-nearest-neighbor classification of numeric sequences.
//!
//! A [`Knn`] holds a labeled training set and assigns each query the majority label among
//! its `k` closest training vectors. Distances are computed by brute force with a
//! [`Metric`], [`Euclidean`] by default. [`split`] partitions a labeled dataset into
//! training and testing sets and [`accuracy`] scores the predictions against ground truth.
//!
//! ```
//! use sdr_knn::{Classifier, Knn, LabeledExample};
//!
//! let knn = Knn::new(vec![
//!     LabeledExample::new([0.0, 0.0], "A"),
//!     LabeledExample::new([10.0, 10.0], "B"),
//! ])
//! .unwrap();
//! assert_eq!(knn.classify(&[[1.0, 1.0]]).unwrap(), vec!["A"]);
//! ```
#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod data;
mod error;
#[cfg(feature = "std")]
mod loader;
mod metric;
mod rank;
mod score;
#[cfg(feature = "serde")]
mod serde_impl;
mod split;
#[cfg(test)]
mod unit_tests;
mod vote;

pub use data::{extract_labels, Dataset, FeatureVector, LabeledExample};
pub use error::{Error, Result};
#[cfg(feature = "std")]
pub use loader::{load_rows, load_rows_from_path, load_sequences, load_sequences_from_path};
pub use metric::{euclidean, Euclidean, Metric};
pub use rank::{rank, RankedNeighbor};
pub use score::{accuracy, score, Score};
pub use split::{split, split_indices, Split};
pub use vote::vote;

use alloc::{boxed::Box, format, vec::Vec};
use core::{fmt::Debug, hash::Hash};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The operations shared by every classifier: predict labels, partition a dataset and
/// score predictions.
pub trait Classifier<L> {
    /// Predicts one label per query, in query order.
    fn classify<Q>(&self, queries: &[Q]) -> Result<Vec<L>>
    where
        Q: AsRef<[f64]>;

    /// Partitions `dataset` into training and testing sets. See [`split`].
    fn split<T, R>(&self, dataset: &[T], train_ratio: f64, rng: &mut R) -> Result<Split<T>>
    where
        T: Clone,
        R: Rng + ?Sized,
    {
        split(dataset, train_ratio, rng)
    }

    /// Percentage of correct predictions. See [`accuracy`].
    fn accuracy(&self, predicted: &[L], actual: &[L]) -> Result<f64>
    where
        L: PartialEq,
    {
        accuracy(predicted, actual)
    }
}

/// Tunable parameters of a [`Knn`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct KnnSettings {
    /// Number of nearest neighbors that vote.
    pub k: usize,
}

impl Default for KnnSettings {
    fn default() -> Self {
        Self { k: 1 }
    }
}

/// A brute-force k-nearest-neighbor classifier over a fixed training set.
///
/// Every training vector shares one dimensionality and holds only finite values, and the
/// training set is never empty. Queries with a NaN or infinite component are rejected.
/// Queries are compared against every training vector, so classification of one query is
/// `O(n * d)`.
///
/// Ties are broken deterministically. Neighbors at exactly equal distance rank by ascending
/// training index, and labels with equal vote counts resolve to the smallest label.
#[derive(Clone, Debug)]
pub struct Knn<L, M = Euclidean> {
    metric: M,
    settings: KnnSettings,
    features: Vec<FeatureVector>,
    labels: Vec<L>,
}

impl<L> Knn<L, Euclidean> {
    /// Creates a [`Knn`] with the [`Euclidean`] metric and default settings.
    ///
    /// Fails if `training` is empty or its vectors differ in dimensionality. A NaN or
    /// infinite component in any training vector is rejected as well.
    pub fn new(training: Vec<LabeledExample<L>>) -> Result<Self> {
        Self::with_metric(Euclidean, training)
    }
}

impl<L, M> Knn<L, M> {
    /// Creates a [`Knn`] that measures distance with `metric`.
    pub fn with_metric(metric: M, training: Vec<LabeledExample<L>>) -> Result<Self> {
        let (features, labels) = training
            .into_iter()
            .map(|LabeledExample { features, label }| (features, label))
            .unzip();
        Self::from_parts(metric, KnnSettings::default(), features, labels)
    }

    pub(crate) fn from_parts(
        metric: M,
        settings: KnnSettings,
        features: Vec<FeatureVector>,
        labels: Vec<L>,
    ) -> Result<Self> {
        let dim = features
            .first()
            .ok_or_else(|| Error::invalid("training", "the training set is empty"))?
            .dim();
        if let Some(bad) = features.iter().find(|f| f.dim() != dim) {
            return Err(Error::DimensionMismatch {
                left: dim,
                right: bad.dim(),
            });
        }
        if let Some(index) = features.iter().position(|f| !is_finite(f)) {
            return Err(Error::invalid(
                "training",
                format!("training vector {} has a non-finite value", index),
            ));
        }
        if features.len() != labels.len() {
            return Err(Error::invalid(
                "training",
                format!(
                    "{} feature vectors for {} labels",
                    features.len(),
                    labels.len()
                ),
            ));
        }
        Ok(Self {
            metric,
            settings,
            features,
            labels,
        })
    }

    /// Default value: `1`
    ///
    /// The number of nearest neighbors that vote on a query's label. It must satisfy
    /// `1 <= k <= len()`; an out of range `k` is reported when classifying, before any
    /// distance is computed. Odd values avoid most vote ties between two classes.
    pub fn k(self, k: usize) -> Self {
        Self {
            settings: KnnSettings { k },
            ..self
        }
    }

    /// Replaces all settings at once.
    pub fn settings(self, settings: KnnSettings) -> Self {
        Self { settings, ..self }
    }

    pub fn get_settings(&self) -> KnnSettings {
        self.settings
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Returns the number of training examples.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always `false`; a [`Knn`] cannot be built from an empty training set.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Dimensionality shared by every training vector.
    pub fn dim(&self) -> usize {
        self.features.first().map_or(0, FeatureVector::dim)
    }

    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Get the (features, label) pair of a training example.
    pub fn get(&self, index: usize) -> Option<(&FeatureVector, &L)> {
        self.features.get(index).zip(self.labels.get(index))
    }

    fn checked_k(&self) -> Result<usize> {
        let k = self.settings.k;
        if k < 1 || k > self.len() {
            return Err(Error::invalid(
                "k",
                format!("{} is not in 1..={}", k, self.len()),
            ));
        }
        Ok(k)
    }
}

impl<L, M> Knn<L, M>
where
    L: Clone + Eq + Hash + Ord + Debug,
    M: Metric,
{
    /// Returns the `k` training examples closest to `query` with their labels, closest first.
    pub fn neighbors(&self, query: &[f64]) -> Result<Vec<(RankedNeighbor, &L)>> {
        let k = self.checked_k()?;
        checked_query(query)?;
        let mut ranked = rank(&self.metric, query, &self.features)?;
        ranked.truncate(k);
        Ok(ranked
            .into_iter()
            .map(|neighbor| (neighbor, &self.labels[neighbor.index]))
            .collect())
    }

    /// Predicts the label of a single query.
    pub fn predict(&self, query: &[f64]) -> Result<&L> {
        let k = self.checked_k()?;
        self.predict_k(query, k)
    }

    fn predict_k(&self, query: &[f64], k: usize) -> Result<&L> {
        checked_query(query)?;
        let mut ranked = rank(&self.metric, query, &self.features)?;
        ranked.truncate(k);
        for neighbor in &ranked {
            tracing::trace!(
                index = neighbor.index,
                distance = neighbor.distance,
                label = ?self.labels[neighbor.index],
                "nearest neighbor"
            );
        }
        let label = vote(&ranked, &self.labels)?;
        tracing::debug!(predicted = ?label, k, "classified query");
        Ok(label)
    }

    /// Classifies every query independently and reports failures per query.
    ///
    /// An invalid `k` still fails the whole call, since no query could succeed.
    pub fn classify_each<Q>(&self, queries: &[Q]) -> Result<Vec<Result<L>>>
    where
        Q: AsRef<[f64]>,
    {
        let k = self.checked_k()?;
        Ok(queries
            .iter()
            .map(|query| self.predict_k(query.as_ref(), k).map(L::clone))
            .collect())
    }

    /// Classifies `queries` on the rayon thread pool.
    ///
    /// Produces the same labels as [`Classifier::classify`]. If several queries fail, the error
    /// of the lowest query index is returned.
    #[cfg(feature = "rayon")]
    pub fn classify_par<Q>(&self, queries: &[Q]) -> Result<Vec<L>>
    where
        Q: AsRef<[f64]> + Sync,
        L: Send + Sync,
        M: Sync,
    {
        use rayon::prelude::*;

        let k = self.checked_k()?;
        let results: Vec<Result<L>> = queries
            .par_iter()
            .map(|query| self.predict_k(query.as_ref(), k).map(L::clone))
            .collect();
        collect_batch(results)
    }
}

impl<L, M> Classifier<L> for Knn<L, M>
where
    L: Clone + Eq + Hash + Ord + Debug,
    M: Metric,
{
    /// Predicts one label per query.
    ///
    /// `k` is validated before any distance is computed. The first query that cannot be
    /// classified aborts the batch with an [`Error::Query`] naming its index.
    fn classify<Q>(&self, queries: &[Q]) -> Result<Vec<L>>
    where
        Q: AsRef<[f64]>,
    {
        let k = self.checked_k()?;
        queries
            .iter()
            .enumerate()
            .map(|(index, query)| {
                self.predict_k(query.as_ref(), k)
                    .map(L::clone)
                    .map_err(|source| Error::Query {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect()
    }
}

fn is_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn checked_query(query: &[f64]) -> Result<()> {
    if !is_finite(query) {
        return Err(Error::invalid("query", "the query has a non-finite value"));
    }
    Ok(())
}

#[cfg(feature = "rayon")]
fn collect_batch<L>(results: Vec<Result<L>>) -> Result<Vec<L>> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            result.map_err(|source| Error::Query {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// Classifies `queries` against `training` with the [`Euclidean`] metric and `k` voters.
pub fn classify<L, Q>(queries: &[Q], training: &[LabeledExample<L>], k: usize) -> Result<Vec<L>>
where
    L: Clone + Eq + Hash + Ord + Debug,
    Q: AsRef<[f64]>,
{
    Knn::new(training.to_vec())?.k(k).classify(queries)
}
