use crate::{Error, Result};
use alloc::{boxed::Box, format, vec::Vec};
use core::ops::Deref;
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable, ordered sequence of real numbers.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FeatureVector(Box<[f64]>);

impl FeatureVector {
    pub fn new(values: impl Into<Box<[f64]>>) -> Self {
        Self(values.into())
    }

    /// Returns the dimensionality of the vector.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for FeatureVector {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values.into_boxed_slice())
    }
}

impl From<&[f64]> for FeatureVector {
    fn from(values: &[f64]) -> Self {
        Self(values.into())
    }
}

impl<const N: usize> From<[f64; N]> for FeatureVector {
    fn from(values: [f64; N]) -> Self {
        Self(Box::new(values))
    }
}

/// A feature vector paired with its class label.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabeledExample<L> {
    pub features: FeatureVector,
    pub label: L,
}

impl<L> LabeledExample<L> {
    pub fn new(features: impl Into<FeatureVector>, label: L) -> Self {
        Self {
            features: features.into(),
            label,
        }
    }
}

impl LabeledExample<i64> {
    /// Splits a numeric row into its features (every column but the last) and its
    /// class index (the last column).
    pub fn from_row(row: &[f64]) -> Result<Self> {
        let (&last, features) = row
            .split_last()
            .ok_or_else(|| Error::invalid("row", "a labeled row needs at least one column"))?;
        Ok(Self::new(features, class_index(last)?))
    }
}

fn class_index(value: f64) -> Result<i64> {
    const LOWEST: f64 = i64::MIN as f64;
    const HIGHEST: f64 = i64::MAX as f64;
    if Float::fract(value) != 0.0 || !(LOWEST..HIGHEST).contains(&value) {
        return Err(Error::invalid(
            "label",
            format!("{} is not an integral class index", value),
        ));
    }
    Ok(value as i64)
}

/// A rectangular matrix of real numbers, one row per example.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Dataset(Vec<Vec<f64>>);

impl Dataset {
    /// Creates a dataset, failing if the rows are not all the same width.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let width = first.len();
            if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
                return Err(Error::invalid(
                    "dataset",
                    format!(
                        "row {} has {} columns, expected {}",
                        row + 1,
                        bad.len(),
                        width
                    ),
                ));
            }
        }
        Ok(Self(rows))
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of columns in every row, or `0` for an empty dataset.
    pub fn width(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    /// Interprets every row as features followed by a trailing class index.
    pub fn labeled(&self) -> Result<Vec<LabeledExample<i64>>> {
        self.0.iter().map(|row| LabeledExample::from_row(row)).collect()
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.0
    }
}

/// Reads the trailing column of every row as an integer class index.
pub fn extract_labels<R>(rows: &[R]) -> Result<Vec<i64>>
where
    R: AsRef<[f64]>,
{
    rows.iter()
        .map(|row| {
            let last = row
                .as_ref()
                .last()
                .ok_or_else(|| Error::invalid("row", "cannot extract a label from an empty row"))?;
            class_index(*last)
        })
        .collect()
}
