use crate::{Error, Result};
use alloc::format;
#[cfg(feature = "serde")]
use serde::Serialize;

/// The outcome of comparing predicted labels against ground truth.
///
/// Only [`score`] builds one, so `total` is never zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Score {
    correct: usize,
    total: usize,
}

impl Score {
    /// Number of positions where the prediction matched.
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Number of predictions scored.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of correct predictions, in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        100.0 * self.correct as f64 / self.total as f64
    }
}

/// Counts the positions where `predicted` and `actual` agree.
///
/// Both sequences must be non-empty and of equal length.
pub fn score<L: PartialEq>(predicted: &[L], actual: &[L]) -> Result<Score> {
    if predicted.len() != actual.len() {
        return Err(Error::invalid(
            "predicted",
            format!(
                "{} predictions for {} actual labels",
                predicted.len(),
                actual.len()
            ),
        ));
    }
    if predicted.is_empty() {
        return Err(Error::invalid(
            "predicted",
            "accuracy of zero predictions is undefined",
        ));
    }
    let correct = predicted.iter().zip(actual).filter(|(p, a)| p == a).count();
    Ok(Score {
        correct,
        total: predicted.len(),
    })
}

/// Percentage of `predicted` labels equal to the `actual` label at the same position.
pub fn accuracy<L: PartialEq>(predicted: &[L], actual: &[L]) -> Result<f64> {
    score(predicted, actual).map(|s| s.percent())
}
